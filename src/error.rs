//! Error types for sql-diff

use thiserror::Error;

/// Result type for sql-diff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sql-diff
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("AI provider error: {0}")]
    Ai(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convert YAML deserialization errors to configuration errors
impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::Config(error.to_string())
    }
}

/// Convert HTTP client errors to AI provider errors
impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Ai(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}
