//! Field-level rules shared by Company and Customer.

use std::sync::OnceLock;

use regex::Regex;

use super::errors::{ValidationError, ValidationResult};

/// 3–32 ASCII alphanumerics or dashes, not starting with a dash
pub const IDENTIFICATION_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9-]{2,31}$";

static IDENTIFICATION_RE: OnceLock<Regex> = OnceLock::new();

fn identification_re() -> &'static Regex {
    IDENTIFICATION_RE
        .get_or_init(|| Regex::new(IDENTIFICATION_PATTERN).expect("identification pattern compiles"))
}

/// Identification must be present and match [`IDENTIFICATION_PATTERN`]
pub fn identification(value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::new(
            "identification",
            "identification must not be empty",
        ));
    }
    if !identification_re().is_match(value) {
        return Err(ValidationError::new(
            "identification",
            "identification has an invalid format",
        ));
    }
    Ok(())
}

/// Field must contain something other than whitespace
pub fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} must not be empty", field),
        ));
    }
    Ok(())
}
