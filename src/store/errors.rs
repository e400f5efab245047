//! # Store Errors
//!
//! Error types shared by the key-value and relational adapters.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backing store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Write would break a unique constraint
    #[error("Duplicate value for unique attribute '{attribute}': {value}")]
    UniqueViolation { attribute: String, value: String },

    /// Secondary index is not declared on the table
    #[error("Unknown index: {0}")]
    UnknownIndex(String),

    /// Item could not be converted to or from its stored form
    #[error("Malformed item: {0}")]
    MalformedItem(String),

    /// Request parameters the store refuses to execute
    #[error("Invalid store request: {0}")]
    InvalidRequest(String),
}

impl StoreError {
    /// Lock poisoning is reported as unavailability
    pub(crate) fn poisoned(table: &str) -> Self {
        StoreError::Unavailable(format!("lock poisoned on table '{}'", table))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::MalformedItem(err.to_string())
    }
}
