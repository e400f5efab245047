//! # Pagination Errors

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Result type for pagination operations
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Pagination errors
#[derive(Debug, Clone, Error)]
pub enum PaginationError {
    /// Continuation token could not be decoded. Never treated as "start over".
    #[error("Invalid pagination cursor: {0}")]
    BadCursor(String),

    /// Page size above the configured ceiling
    #[error("Limit {requested} exceeds maximum {max}")]
    LimitExceeded { requested: usize, max: usize },

    /// Page or limit out of range
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Store reported more data without advancing
    #[error("Scan on '{table}' made no progress")]
    NoProgress { table: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
