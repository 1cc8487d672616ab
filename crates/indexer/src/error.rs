use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Chunker error: {0}")]
    ChunkerError(#[from] hr_chunker::ChunkerError),

    #[error("Embedding provider error: {0}")]
    ProviderError(#[from] hr_providers::ProviderError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] hr_vector_store::VectorStoreError),

    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("{0}")]
    Other(String),
}

impl IndexerError {
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }
}
