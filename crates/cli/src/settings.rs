use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use hr_providers::{
    ChatClient, EchoChat, EmbeddingClient, HashedEmbeddings, OpenAiChat, OpenAiEmbeddings,
    DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, ENV_OPENAI_API_KEY,
};

/// Embedding backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// Remote OpenAI-compatible embeddings endpoint
    OpenAi,
    /// Deterministic offline hashing backend
    Hash,
}

impl FromStr for EmbeddingBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "hash" => Ok(Self::Hash),
            other => bail!("Unknown embedding backend '{other}' (expected 'openai' or 'hash')"),
        }
    }
}

/// Chat backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatBackend {
    /// Remote OpenAI-compatible chat completions endpoint
    OpenAi,
    /// Offline backend that echoes the prompt, for hermetic runs
    Echo,
}

impl FromStr for ChatBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "echo" => Ok(Self::Echo),
            other => bail!("Unknown chat backend '{other}' (expected 'openai' or 'echo')"),
        }
    }
}

/// Run configuration, read from the environment once at process start.
///
/// No component reads ambient environment state; subcommands apply their
/// flag overrides to this value, call [`Settings::validate`], and pass the
/// result into constructors.
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub embedding_backend: EmbeddingBackend,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub embedding_batch_size: usize,
    pub chat_backend: ChatBackend,
    pub chat_model: String,
    pub raw_data_dir: PathBuf,
    pub index_dir: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub max_context_chars: usize,
    pub temperature: f32,
    pub strict_grounded: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openai_api_key: env::var(ENV_OPENAI_API_KEY)
                .unwrap_or_default()
                .trim()
                .to_string(),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            embedding_backend: env_or("EMBEDDING_BACKEND", "openai").parse()?,
            embedding_model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            embedding_dimension: env_parse("EMBEDDING_DIMENSION", 384)?,
            embedding_batch_size: env_parse(
                "EMBEDDING_BATCH_SIZE",
                hr_indexer::DEFAULT_BATCH_SIZE,
            )?,
            chat_backend: env_or("CHAT_BACKEND", "openai").parse()?,
            chat_model: env_or("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            raw_data_dir: PathBuf::from(env_or("RAW_DATA_DIR", "./data/raw")),
            index_dir: PathBuf::from(env_or("INDEX_DIR", "./data/indexes/hr_default")),
            chunk_size: env_parse("CHUNK_SIZE", 900)?,
            chunk_overlap: env_parse("CHUNK_OVERLAP", 150)?,
            top_k: env_parse("TOP_K", 5)?,
            max_context_chars: env_parse("MAX_CONTEXT_CHARS", 6000)?,
            temperature: env_parse("TEMPERATURE", 0.0_f32)?,
            strict_grounded: env_truthy_or("STRICT_GROUNDED", true),
        })
    }

    /// Reject invalid combinations before any index or remote access.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            bail!("CHUNK_SIZE must be > 0");
        }
        if self.chunk_overlap >= self.chunk_size {
            bail!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                self.chunk_overlap,
                self.chunk_size
            );
        }
        if self.top_k == 0 {
            bail!("TOP_K must be > 0");
        }
        if self.max_context_chars == 0 {
            bail!("MAX_CONTEXT_CHARS must be > 0");
        }
        if self.embedding_batch_size == 0 {
            bail!("EMBEDDING_BATCH_SIZE must be > 0");
        }
        if self.embedding_dimension == 0 {
            bail!("EMBEDDING_DIMENSION must be > 0");
        }
        if self.needs_api_key() && self.openai_api_key.is_empty() {
            bail!(
                "{ENV_OPENAI_API_KEY} is missing; set it, or select the offline backends \
                 (EMBEDDING_BACKEND=hash, CHAT_BACKEND=echo)"
            );
        }
        Ok(())
    }

    pub fn embedding_client(&self) -> Result<Arc<dyn EmbeddingClient>> {
        match self.embedding_backend {
            EmbeddingBackend::OpenAi => {
                let client = OpenAiEmbeddings::new(
                    self.openai_api_key.clone(),
                    self.embedding_model.clone(),
                )?
                .with_base_url(self.openai_base_url.clone());
                Ok(Arc::new(client))
            }
            EmbeddingBackend::Hash => Ok(Arc::new(HashedEmbeddings::new(self.embedding_dimension))),
        }
    }

    pub fn chat_client(&self) -> Result<Arc<dyn ChatClient>> {
        match self.chat_backend {
            ChatBackend::OpenAi => {
                let client = OpenAiChat::new(self.openai_api_key.clone(), self.chat_model.clone())?
                    .with_base_url(self.openai_base_url.clone());
                Ok(Arc::new(client))
            }
            ChatBackend::Echo => Ok(Arc::new(EchoChat)),
        }
    }

    fn needs_api_key(&self) -> bool {
        self.embedding_backend == EmbeddingBackend::OpenAi
            || self.chat_backend == ChatBackend::OpenAi
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key}: '{raw}'")),
        _ => Ok(default),
    }
}

fn env_truthy_or(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => is_truthy(&raw),
        _ => default,
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_settings() -> Settings {
        Settings {
            openai_api_key: String::new(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            embedding_backend: EmbeddingBackend::Hash,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimension: 64,
            embedding_batch_size: 128,
            chat_backend: ChatBackend::Echo,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            raw_data_dir: PathBuf::from("./data/raw"),
            index_dir: PathBuf::from("./data/indexes/hr_default"),
            chunk_size: 900,
            chunk_overlap: 150,
            top_k: 5,
            max_context_chars: 6000,
            temperature: 0.0,
            strict_grounded: true,
        }
    }

    #[test]
    fn test_backend_names_parse_case_insensitively() {
        assert_eq!(
            "OpenAI".parse::<EmbeddingBackend>().unwrap(),
            EmbeddingBackend::OpenAi
        );
        assert_eq!(
            " hash ".parse::<EmbeddingBackend>().unwrap(),
            EmbeddingBackend::Hash
        );
        assert!("stub".parse::<EmbeddingBackend>().is_err());

        assert_eq!("echo".parse::<ChatBackend>().unwrap(), ChatBackend::Echo);
        assert!("text".parse::<ChatBackend>().is_err());
    }

    #[test]
    fn test_truthy_values() {
        for raw in ["1", "true", "TRUE", " yes", "y"] {
            assert!(is_truthy(raw), "{raw:?} should be truthy");
        }
        for raw in ["0", "false", "no", "n", "off", ""] {
            assert!(!is_truthy(raw), "{raw:?} should be falsy");
        }
    }

    #[test]
    fn test_validate_accepts_offline_defaults() {
        valid_settings().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_overlap_not_smaller_than_size() {
        let mut settings = valid_settings();
        settings.chunk_size = 200;
        settings.chunk_overlap = 200;

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("CHUNK_OVERLAP"));
    }

    #[test]
    fn test_validate_rejects_zero_tunables() {
        for mutate in [
            (|s: &mut Settings| s.chunk_size = 0) as fn(&mut Settings),
            |s| s.top_k = 0,
            |s| s.max_context_chars = 0,
            |s| s.embedding_batch_size = 0,
            |s| s.embedding_dimension = 0,
        ] {
            let mut settings = valid_settings();
            mutate(&mut settings);
            assert!(settings.validate().is_err());
        }
    }

    #[test]
    fn test_validate_requires_key_for_remote_backends() {
        let mut settings = valid_settings();
        settings.embedding_backend = EmbeddingBackend::OpenAi;

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        settings.openai_api_key = "sk-test".to_string();
        settings.validate().unwrap();
    }

    #[test]
    fn test_offline_clients_report_model_ids() {
        let settings = valid_settings();

        assert_eq!(settings.embedding_client().unwrap().model_id(), "hash-64");
        assert_eq!(settings.chat_client().unwrap().model_id(), "echo");
    }
}
