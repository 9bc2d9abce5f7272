//! Error types for the report core
//!
//! Field-level validation problems are never errors in this sense: they are
//! returned as [`FieldError`](crate::validation::FieldError) data. The types
//! here cover malformed input that cannot be turned into an answer set.

use thiserror::Error;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// A respondent category label outside the known set
    #[error("Unknown respondent category: {0}")]
    UnknownCategory(String),

    /// Input data that cannot be interpreted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Answer set could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl CoreError {
    /// Create an unknown category error
    pub fn unknown_category(label: impl Into<String>) -> Self {
        CoreError::UnknownCategory(label.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CoreError::InvalidInput(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::UnknownCategory(_) | CoreError::InvalidInput(_) | CoreError::ParseError(_)
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::ParseError(format!("JSON error: {}", err))
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
