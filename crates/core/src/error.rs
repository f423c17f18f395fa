use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuokkaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Editor host error: {0}")]
    Host(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for QuokkaError {
    fn from(err: tokio::task::JoinError) -> Self {
        QuokkaError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuokkaError>;
