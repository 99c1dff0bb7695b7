//! Error handling for the news classifier

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsClassifierError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Language resource unavailable for '{language}': {reason}")]
    ResourceUnavailable { language: String, reason: String },

    #[error("Class index out of range: {0}")]
    LabelOutOfRange(usize),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl NewsClassifierError {
    pub fn resource_unavailable(language: &str, reason: impl Into<String>) -> Self {
        NewsClassifierError::ResourceUnavailable {
            language: language.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsClassifierError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for NewsClassifierError {
    fn from(err: anyhow::Error) -> Self {
        NewsClassifierError::Processing(err.to_string())
    }
}
