//! CLI Error Types

use policy_core::QueryError;
use policy_store::StoreError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] QueryError),

    /// Data file error
    #[error("Data error: {0}")]
    StoreError(#[from] StoreError),

    /// JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Server error
    #[error("Server error: {message}")]
    ServerError { message: String },
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        CliError::ConfigError {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(message: impl Into<String>) -> Self {
        CliError::ServerError {
            message: message.into(),
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ConfigError { .. } => 1,
            CliError::InvalidArgument(_) => 2,
            CliError::StoreError(StoreError::MissingFile(_)) => 3,
            CliError::StoreError(_) => 5,
            CliError::JsonError(_) => 6,
            CliError::ServerError { .. } => 30,
        }
    }
}
