//! # Page Parameters
//!
//! Raw query-string values are resolved here. Absent or non-numeric values
//! fall back to defaults; numeric values outside the allowed range are
//! rejected rather than clamped.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

use super::errors::{PaginationError, PaginationResult};

/// Default page size if not specified
pub const DEFAULT_LIMIT: usize = 10;

/// Maximum page size
pub const MAX_LIMIT: usize = 100;

/// Page-size bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    #[serde(default = "max_limit")]
    pub max_limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn max_limit() -> usize {
    MAX_LIMIT
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Parse an integer query value. Numbers too large for `i64` saturate
/// instead of being treated as non-numeric.
fn parse_integer(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

impl PageLimits {
    /// Resolve a raw `limit` parameter
    pub fn parse_limit(&self, raw: Option<&str>) -> PaginationResult<usize> {
        match raw.and_then(parse_integer) {
            None => Ok(self.default_limit),
            Some(n) => self.check_limit(n),
        }
    }

    /// Bounds check for an already-numeric limit
    pub fn check_limit(&self, limit: i64) -> PaginationResult<usize> {
        if limit < 1 {
            return Err(ValidationError::new("limit", "limit must be at least 1").into());
        }
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        if limit > self.max_limit {
            return Err(PaginationError::LimitExceeded {
                requested: limit,
                max: self.max_limit,
            });
        }
        Ok(limit)
    }

    /// Resolve a raw 1-based `page` parameter
    pub fn parse_page(&self, raw: Option<&str>) -> PaginationResult<usize> {
        match raw.and_then(parse_integer) {
            None => Ok(1),
            Some(n) if n < 1 => {
                Err(ValidationError::new("page", "page must be at least 1").into())
            }
            Some(n) => Ok(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }
}
