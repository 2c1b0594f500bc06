//! Error types for the culture map pipeline

use thiserror::Error;

/// Result type alias for culture map operations
pub type Result<T> = std::result::Result<T, CultureMapError>;

/// Main error type for the culture map pipeline
#[derive(Error, Debug)]
pub enum CultureMapError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for CultureMapError {
    fn from(err: serde_json::Error) -> Self {
        CultureMapError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for CultureMapError {
    fn from(err: ndarray::ShapeError) -> Self {
        CultureMapError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
