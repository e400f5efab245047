//! # Lifecycle State
//!
//! Two states, reachable from each other indefinitely:
//!
//! ```text
//!   ACTIVE  --soft_delete-->  DELETED { at }
//!   DELETED --restore------>  ACTIVE
//! ```
//!
//! Stored as a nullable `deletedAt` column/attribute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribute name holding the deletion timestamp
pub const DELETED_AT: &str = "deletedAt";

/// Soft-delete state of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<DateTime<Utc>>", into = "Option<DateTime<Utc>>")]
pub enum Lifecycle {
    /// Visible to ordinary reads
    #[default]
    Active,

    /// Hidden from ordinary reads, reachable only through restore
    Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    pub fn is_deleted(&self) -> bool {
        !self.is_active()
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(*at),
        }
    }

    /// Move to DELETED. Applying it to a deleted record overwrites the
    /// timestamp.
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        *self = Lifecycle::Deleted { at: now };
    }

    /// Move to ACTIVE
    pub fn restore(&mut self) {
        *self = Lifecycle::Active;
    }
}

impl From<Option<DateTime<Utc>>> for Lifecycle {
    fn from(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Lifecycle::Deleted { at },
            None => Lifecycle::Active,
        }
    }
}

impl From<Lifecycle> for Option<DateTime<Utc>> {
    fn from(lifecycle: Lifecycle) -> Self {
        lifecycle.deleted_at()
    }
}
