//! # Soft-Delete Lifecycle
//!
//! Records are never hard-deleted through the public contract. Deletion
//! moves a record to DELETED (timestamped); restore moves it back. Ordinary
//! reads see ACTIVE records only.

pub mod manager;
pub mod state;

pub use manager::{
    LifecycleError, LifecycleManager, LifecycleResult, LifecycleStore, SoftDeletable, Visibility,
};
pub use state::{Lifecycle, DELETED_AT};
