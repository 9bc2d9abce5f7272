//! Error types for storage and throttling

use thiserror::Error;

/// Main error type for security operations
#[derive(Error, Debug)]
pub enum SecurityError {
    /// The backing store rejected an operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored state could not be decoded
    #[error("Corrupt state under '{key}': {reason}")]
    CorruptState { key: String, reason: String },

    /// I/O error (for file-backed stores)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SecurityError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        SecurityError::Storage(msg.into())
    }

    /// Create a corrupt state error
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SecurityError::CorruptState {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for security operations
pub type Result<T> = std::result::Result<T, SecurityError>;
