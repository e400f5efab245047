//! # Record Store Adapters
//!
//! Two storage shapes sit behind this module:
//!
//! - [`KvTable`]: hash-keyed JSON items, paged scans with an exclusive start
//!   key, and secondary-index lookups (Company).
//! - [`RelationalTable`]: typed rows with unique columns and
//!   offset/count queries ordered by creation time (Customer).
//!
//! The two are never coupled transactionally.

pub mod errors;
pub mod filter;
pub mod kv;
pub mod relational;

pub use errors::{StoreError, StoreResult};
pub use filter::{Condition, ConditionOperator, ScanFilter};
pub use kv::{key_of, InMemoryKvTable, Key, KvTable, ScanOutput, ScanRequest};
pub use relational::{FindQuery, InMemoryRelationalTable, RelationalTable, Row, SortOrder};
