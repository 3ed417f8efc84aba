use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid content: {0}")]
    Content(String),
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
