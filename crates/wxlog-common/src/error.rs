//! Error types for wxlog

use thiserror::Error;

/// Result type alias for wxlog operations
pub type Result<T> = std::result::Result<T, WxlogError>;

/// Main error type for the shared wxlog code
#[derive(Error, Debug)]
pub enum WxlogError {
    #[error("Format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
