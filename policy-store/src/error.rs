//! Store error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the JSON file stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Required data file missing: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Policy with ID {0} not found")]
    NotFound(String),

    #[error("No policy id left after {0}")]
    IdExhausted(u64),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;
