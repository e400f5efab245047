//! # Pagination
//!
//! Two independent schemes:
//!
//! - Cursor pagination over key-value scans ([`CursorPaginator`]). Tokens are
//!   `base64(JSON(lastEvaluatedKey))` and are only valid for the filter they
//!   were produced under.
//! - Offset pagination for relational listings ([`PageRequest`] /
//!   [`OffsetPage`]).

pub mod cursor;
pub mod engine;
pub mod errors;
pub mod offset;
pub mod params;

pub use cursor::Cursor;
pub use engine::{CursorPage, CursorPaginator};
pub use errors::{PaginationError, PaginationResult};
pub use offset::{OffsetPage, PageRequest};
pub use params::{PageLimits, DEFAULT_LIMIT, MAX_LIMIT};
