//! Error types for Policy Core

use thiserror::Error;

/// Errors raised while interpreting a list query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error("Invalid page size: {0}")]
    InvalidSize(String),

    #[error("Page size {requested} exceeds maximum of {max}")]
    SizeTooLarge { requested: usize, max: usize },
}

/// Query result type
pub type QueryResult<T> = Result<T, QueryError>;
