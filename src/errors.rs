//! # Service Errors
//!
//! The error surface of the Company and Customer services. Module errors
//! (store, lifecycle, pagination, validation) convert into [`ServiceError`],
//! which knows its HTTP status code but nothing else about the transport.

use thiserror::Error;
use uuid::Uuid;

use crate::lifecycle::LifecycleError;
use crate::pagination::PaginationError;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service errors
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Field invariant violated
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown status value or malformed parameter
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParam { name: String, message: String },

    /// No active record with this key
    #[error("{entity} not found")]
    NotFound { entity: &'static str, key: String },

    /// Continuation token could not be decoded
    #[error("Invalid pagination cursor: {0}")]
    BadCursor(String),

    /// Limit exceeds maximum
    #[error("Limit {0} exceeds maximum {1}")]
    LimitExceeded(usize, usize),

    /// Write would duplicate a unique attribute
    #[error("{attribute} '{value}' already exists")]
    Conflict { attribute: String, value: String },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Backing store failed or stalled
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Stored data could not be interpreted
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Parse a record id; a non-UUID can never name a stored record
    pub fn parse_id(entity: &'static str, raw: &str) -> ServiceResult<Uuid> {
        Uuid::parse_str(raw).map_err(|_| ServiceError::not_found(entity, raw))
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::InvalidParam { .. } => 400,
            ServiceError::BadCursor(_) => 400,
            ServiceError::LimitExceeded(_, _) => 400,
            ServiceError::NotFound { .. } => 404,
            ServiceError::Conflict { .. } => 409,
            ServiceError::Internal(_) => 500,
            ServiceError::StoreUnavailable(_) => 503,
        }
    }

    /// Client errors are the caller's to fix
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ServiceError::StoreUnavailable(msg),
            StoreError::UniqueViolation { attribute, value } => {
                ServiceError::Conflict { attribute, value }
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<LifecycleError> for ServiceError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotFound { entity, key } => ServiceError::NotFound { entity, key },
            LifecycleError::Store(e) => e.into(),
        }
    }
}

impl From<PaginationError> for ServiceError {
    fn from(err: PaginationError) -> Self {
        match err {
            PaginationError::BadCursor(msg) => ServiceError::BadCursor(msg),
            PaginationError::LimitExceeded { requested, max } => {
                ServiceError::LimitExceeded(requested, max)
            }
            PaginationError::Invalid(e) => ServiceError::Validation(e),
            e @ PaginationError::NoProgress { .. } => ServiceError::StoreUnavailable(e.to_string()),
            PaginationError::Store(e) => e.into(),
        }
    }
}
