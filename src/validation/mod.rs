//! # Entity Validation
//!
//! Field invariants checked before anything reaches a store. Checks run in
//! a fixed order (identification, name, lastname) and stop at the first
//! failure. Partial updates validate only the fields they carry.

pub mod errors;
pub mod rules;

pub use errors::{ValidationError, ValidationResult};
pub use rules::IDENTIFICATION_PATTERN;

/// Pure pre-persistence check
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}
