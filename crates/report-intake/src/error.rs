//! Error types for the intake client
//!
//! Only transport, configuration and local I/O problems surface here. Field
//! errors and throttling are ordinary outcomes, see
//! [`SubmitOutcome`](crate::submit::SubmitOutcome).

use report_core::CoreError;
use report_security::SecurityError;
use thiserror::Error;

/// Main error type for intake operations
#[derive(Error, Debug)]
pub enum IntakeError {
    /// No remote endpoint was configured
    #[error("Submission endpoint not configured")]
    NotConfigured,

    /// The request could not be sent or completed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid configuration value or file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Local state store failure
    #[error(transparent)]
    Storage(#[from] SecurityError),

    /// Answer set could not be interpreted
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IntakeError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        IntakeError::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        IntakeError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        IntakeError::FileError(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        match self {
            IntakeError::NotConfigured
            | IntakeError::Config(_)
            | IntakeError::InvalidInput(_)
            | IntakeError::FileError(_) => true,
            IntakeError::Core(e) => e.is_user_error(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for IntakeError {
    fn from(err: reqwest::Error) -> Self {
        IntakeError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        IntakeError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        IntakeError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for IntakeError {
    fn from(err: serde_yaml::Error) -> Self {
        IntakeError::SerializationError(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for IntakeError {
    fn from(err: toml::de::Error) -> Self {
        IntakeError::Config(format!("TOML error: {}", err))
    }
}

/// Result type alias for intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            IntakeError::NotConfigured.to_string(),
            "Submission endpoint not configured"
        );
        assert_eq!(
            IntakeError::Transport("connection refused".to_string()).to_string(),
            "Transport error: connection refused"
        );
    }

    #[test]
    fn test_is_user_error() {
        assert!(IntakeError::NotConfigured.is_user_error());
        assert!(IntakeError::file_error("missing").is_user_error());
        assert!(!IntakeError::Transport("x".to_string()).is_user_error());
        assert!(!IntakeError::Storage(SecurityError::storage("x")).is_user_error());
    }

    #[test]
    fn test_toml_error_is_config() {
        let err: IntakeError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, IntakeError::Config(_)));
    }
}
