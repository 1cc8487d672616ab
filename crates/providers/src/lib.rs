//! # HR Providers
//!
//! Embedding and chat backends behind small async traits.
//!
//! Remote backends speak the OpenAI wire format (`/embeddings` and
//! `/chat/completions`) over `reqwest`; offline backends
//! ([`HashedEmbeddings`], [`EchoChat`]) are deterministic stand-ins that
//! keep tests and air-gapped runs hermetic. Backend selection is explicit
//! configuration at the call site; nothing in this crate reads the process
//! environment.
//!
//! ## Example
//!
//! ```rust
//! use hr_providers::hashed_embed;
//!
//! let vector = hashed_embed("How many PTO days do I get?", 64);
//! assert_eq!(vector.len(), 64);
//!
//! // Unit length, so inner products are cosine similarities
//! let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
//! assert!((norm - 1.0).abs() < 1e-5);
//! ```

mod chat;
mod embedding;
mod error;

pub use chat::{ChatClient, EchoChat, OpenAiChat, DEFAULT_CHAT_MODEL};
pub use embedding::{
    hashed_embed, EmbeddingClient, HashedEmbeddings, OpenAiEmbeddings, DEFAULT_EMBEDDING_MODEL,
};
pub use error::{ProviderError, Result};

/// Default OpenAI-compatible API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment key named in missing-credential errors
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
