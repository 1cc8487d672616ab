use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ProviderError, Result};
use crate::{DEFAULT_BASE_URL, ENV_OPENAI_API_KEY};

/// Default embedding model id
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Turns text into fixed-dimension vectors
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a batch of texts: one vector per input, order preserved.
    /// An empty batch yields an empty result without a remote call.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| ProviderError::Other("No embedding returned".to_string()))
    }

    /// Model identifier recorded in index metadata
    fn model_id(&self) -> &str;
}

/// OpenAI-compatible `/embeddings` client
pub struct OpenAiEmbeddings {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbeddings {
    /// Create a client for an OpenAI-compatible API.
    ///
    /// Fails when the API key is empty.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey(ENV_OPENAI_API_KEY.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: model.into(),
        })
    }

    /// Override the API root (self-hosted gateways, test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl EmbeddingClient for OpenAiEmbeddings {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        log::debug!("Embedding batch of {} texts via {}", texts.len(), self.model);

        let body = json!({
            "model": self.model,
            "input": texts,
        });

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        // One vector per input or the rows cannot be trusted to line up
        if parsed.data.len() != texts.len() {
            return Err(ProviderError::BatchMismatch {
                expected: texts.len(),
                actual: parsed.data.len(),
            });
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Response payload of the embeddings endpoint
#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

/// A single embedding row
#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Deterministic offline embedding backend.
///
/// Vectors are derived from an FNV-1a hash of the text expanded through a
/// splitmix64 sequence, mapped into [-1, 1) and L2-normalized. The same
/// text always yields the same unit vector, so retrieval behaves stably
/// without any network access.
pub struct HashedEmbeddings {
    dimension: usize,
    model: String,
}

impl HashedEmbeddings {
    /// Create a backend emitting vectors of the given dimension
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            model: format!("hash-{dimension}"),
        }
    }

    /// Vector dimension of this backend
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }
}

#[async_trait]
impl EmbeddingClient for HashedEmbeddings {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| hashed_embed(text, self.dimension))
            .collect())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Deterministic unit vector for a text
#[must_use]
pub fn hashed_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = OpenAiEmbeddings::new("", DEFAULT_EMBEDDING_MODEL);
        assert!(matches!(result, Err(ProviderError::MissingApiKey(_))));
    }

    #[test]
    fn test_base_url_override() {
        let client = OpenAiEmbeddings::new("key", DEFAULT_EMBEDDING_MODEL)
            .unwrap()
            .with_base_url("http://localhost:9999/v1");
        assert_eq!(client.base_url, "http://localhost:9999/v1");
        assert_eq!(client.model_id(), DEFAULT_EMBEDDING_MODEL);
    }

    #[test]
    fn test_hashed_embed_deterministic() {
        let a = hashed_embed("vacation policy", 32);
        let b = hashed_embed("vacation policy", 32);
        let c = hashed_embed("sick leave", 32);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_hashed_embed_is_unit_length() {
        for text in ["", "a", "Employees get 20 PTO days"] {
            let vec = hashed_embed(text, 48);
            let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5, "norm for {text:?} was {norm}");
        }
    }

    #[test]
    fn test_hashed_embed_depends_on_dimension() {
        let short = hashed_embed("text", 8);
        let long = hashed_embed("text", 16);
        assert_ne!(short, long[..8].to_vec());
    }

    #[tokio::test]
    async fn test_hashed_batch_preserves_order() {
        let backend = HashedEmbeddings::new(16);
        let texts = vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ];

        let vectors = backend.embed_batch(&texts).await.unwrap();

        assert_eq!(vectors.len(), 3);
        for (text, vector) in texts.iter().zip(&vectors) {
            assert_eq!(vector, &hashed_embed(text, 16));
        }
    }

    #[tokio::test]
    async fn test_empty_batch_short_circuits() {
        let backend = HashedEmbeddings::new(16);
        let vectors = backend.embed_batch(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }

    #[tokio::test]
    async fn test_embed_single_matches_batch() {
        let backend = HashedEmbeddings::new(16);
        let single = backend.embed("question").await.unwrap();
        assert_eq!(single, hashed_embed("question", 16));
    }
}
