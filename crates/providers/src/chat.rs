use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ProviderError, Result};
use crate::{DEFAULT_BASE_URL, ENV_OPENAI_API_KEY};

/// Default chat completion model id
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4.1-mini";

/// Produces a completion from a system instruction and a user prompt
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generate a completion
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String>;

    /// Model identifier reported in answers
    fn model_id(&self) -> &str;
}

/// OpenAI-compatible `/chat/completions` client
pub struct OpenAiChat {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChat {
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
impl ChatClient for OpenAiChat {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        let body = json!({
            "model": self.model,
            "temperature": temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
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

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(text)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Response payload of the chat completions endpoint
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// A single completion choice
#[derive(Deserialize)]
struct Choice {
    message: Message,
}

/// Message carrying the generated text
#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: String,
}

/// Offline chat backend that returns the user prompt unchanged.
///
/// Whatever context was interpolated into the prompt comes straight back
/// out, which lets hermetic tests assert on grounding behavior.
pub struct EchoChat;

#[async_trait]
impl ChatClient for EchoChat {
    async fn complete(&self, _system: &str, user: &str, _temperature: f32) -> Result<String> {
        Ok(user.to_string())
    }

    fn model_id(&self) -> &str {
        "echo"
    }
}
