//! Error types for dictform.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading dictionaries, evaluating expressions or rendering controls.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Dictionary '{0}' not found")]
    DictionaryNotFound(String),

    #[error("Invalid expression for field '{field}': {reason}")]
    Expression { field: String, reason: String },

    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),

    #[error("Upload error on field '{field}': {reason}")]
    Upload { field: String, reason: String },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Record error: {0}")]
    Record(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
