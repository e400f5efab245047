//! # Validation Errors

use serde::Serialize;
use thiserror::Error;

/// Result type for validation checks
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A violated field invariant. Locally detectable, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Validation failed on '{field}': {message}")]
pub struct ValidationError {
    /// Offending field, as named on the wire
    pub field: String,

    /// What is wrong with it
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
