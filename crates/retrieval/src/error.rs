use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] hr_vector_store::VectorStoreError),

    #[error("Embedding provider error: {0}")]
    ProviderError(#[from] hr_providers::ProviderError),

    #[error("Empty query")]
    EmptyQuery,

    #[error(
        "Query embedding has dimension {actual} but the index was built with dimension \
         {expected}; use the same embedding model as at ingestion"
    )]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Other(String),
}
