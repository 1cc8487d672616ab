use thiserror::Error;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors from embedding and chat backends
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Required API credential is absent
    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    /// Request could not be sent or the response body could not be read
    #[error("Request failed: {0}")]
    Request(String),

    /// Backend answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Embedding response did not line up with the request batch
    #[error("Backend returned {actual} vectors for {expected} inputs")]
    BatchMismatch { expected: usize, actual: usize },

    /// Malformed response payload
    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Create a request error
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
