use std::path::PathBuf;

use thiserror::Error;

/// Result type for vector store operations
pub type Result<T> = std::result::Result<T, VectorStoreError>;

/// Errors from index construction, persistence, and search
#[derive(Error, Debug)]
pub enum VectorStoreError {
    /// Search called with an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A persisted artifact is absent
    #[error("Missing index artifact: {} (re-run ingestion to rebuild the index)", .0.display())]
    MissingArtifact(PathBuf),

    /// Persisted artifacts disagree with each other
    #[error("Inconsistent index artifacts: {0}")]
    Inconsistent(String),

    /// Vector dimension mismatch
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl VectorStoreError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a consistency error
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::Inconsistent(msg.into())
    }
}
