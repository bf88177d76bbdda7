//! Error types shared across the workspace

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, CommonError>;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("Invalid relation kind: {0}")]
    InvalidRelationKind(String),
}
