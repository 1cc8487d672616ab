use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnswererError>;

#[derive(Error, Debug)]
pub enum AnswererError {
    #[error("Chat provider error: {0}")]
    ProviderError(#[from] hr_providers::ProviderError),

    #[error("Empty question")]
    EmptyQuestion,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

impl AnswererError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
