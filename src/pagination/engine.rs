//! # Cursor Paginator
//!
//! Turns raw key-value scans into bounded pages. The store filters after
//! reading, so a single raw page may come back short; the paginator keeps
//! scanning with the remaining budget until the page is full or the store
//! runs out. Each follow-up scan asks for exactly the number of items still
//! missing, so the last key read is always the last key returned and no
//! matching item is skipped between calls.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::store::{Key, KvTable, ScanFilter, ScanRequest, StoreError};

use super::cursor::Cursor;
use super::errors::{PaginationError, PaginationResult};
use super::params::PageLimits;

/// One page of cursor-paginated results
#[derive(Debug, Clone)]
pub struct CursorPage<T> {
    pub items: Vec<T>,

    /// Present iff further matching items may exist
    pub next_cursor: Option<Cursor>,
}

/// Cursor pagination over a [`KvTable`]
#[derive(Clone)]
pub struct CursorPaginator {
    table: Arc<dyn KvTable>,
    limits: PageLimits,
}

impl CursorPaginator {
    pub fn new(table: Arc<dyn KvTable>, limits: PageLimits) -> Self {
        Self { table, limits }
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Decode a token into a start key for this table. A key that lacks the
    /// partition attribute was not issued by this table.
    fn start_key(&self, token: &str) -> PaginationResult<Key> {
        let key = Cursor::decode(token)?;
        let partition_key = self.table.partition_key();
        if !key.get(partition_key).is_some_and(|v| v.is_string()) {
            return Err(PaginationError::BadCursor(format!(
                "key has no '{}' attribute",
                partition_key
            )));
        }
        Ok(key)
    }

    /// List one page.
    ///
    /// `limit` is the raw query value. An empty `cursor` is the same as no
    /// cursor; any other cursor must decode or the call fails before the
    /// store is touched.
    pub async fn list<T: DeserializeOwned>(
        &self,
        limit: Option<&str>,
        cursor: Option<&str>,
        filter: ScanFilter,
    ) -> PaginationResult<CursorPage<T>> {
        let limit = self.limits.parse_limit(limit)?;
        let mut start_key = match cursor.filter(|c| !c.is_empty()) {
            Some(token) => Some(self.start_key(token)?),
            None => None,
        };

        let mut items = Vec::with_capacity(limit);
        let mut scans = 0usize;

        let next_key = loop {
            let remaining = limit - items.len();
            let request = ScanRequest {
                filter: filter.clone(),
                limit: remaining,
                exclusive_start_key: start_key.clone(),
            };
            let output = self.table.scan(request).await?;
            scans += 1;

            if let Some(next) = &output.last_evaluated_key {
                if output.scanned_count == 0 || start_key.as_ref() == Some(next) {
                    return Err(PaginationError::NoProgress {
                        table: self.table.name().to_string(),
                    });
                }
            }

            for value in output.items {
                let item = serde_json::from_value::<T>(value).map_err(StoreError::from)?;
                items.push(item);
            }

            match output.last_evaluated_key {
                None => break None,
                Some(next) if items.len() >= limit => break Some(next),
                Some(next) => start_key = Some(next),
            }
        };

        debug!(
            table = self.table.name(),
            limit,
            returned = items.len(),
            scans,
            has_more = next_key.is_some(),
            "Cursor page assembled"
        );

        let next_cursor = next_key.as_ref().map(Cursor::encode).transpose()?;
        Ok(CursorPage { items, next_cursor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Condition, InMemoryKvTable};
    use serde_json::{json, Value};
    use std::collections::HashSet;

    async fn seeded(count: usize) -> Arc<InMemoryKvTable> {
        let table = Arc::new(InMemoryKvTable::new("things", "id"));
        for i in 0..count {
            let kind = if i % 3 == 0 { "odd" } else { "plain" };
            table
                .put(json!({ "id": format!("k{:03}", i), "kind": kind }))
                .await
                .unwrap();
        }
        table
    }

    fn ids(items: &[Value]) -> Vec<String> {
        items
            .iter()
            .map(|v| v["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_traversal_is_complete() {
        let table = seeded(23).await;
        let paginator = CursorPaginator::new(table, PageLimits::default());

        let mut seen = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page: CursorPage<Value> = paginator
                .list(Some("5"), cursor.as_deref(), ScanFilter::new())
                .await
                .unwrap();
            assert!(page.items.len() <= 5);
            seen.extend(ids(&page.items));
            match page.next_cursor {
                Some(c) => cursor = Some(c.into_string()),
                None => break,
            }
        }

        let unique: HashSet<_> = seen.iter().cloned().collect();
        assert_eq!(seen.len(), 23);
        assert_eq!(unique.len(), 23);
    }

    #[tokio::test]
    async fn test_filtered_page_is_filled_across_scans() {
        let table = seeded(30).await;
        let paginator = CursorPaginator::new(table, PageLimits::default());
        let filter = ScanFilter::new().and(Condition::eq("kind", "odd"));

        let page: CursorPage<Value> = paginator.list(Some("4"), None, filter.clone()).await.unwrap();
        assert_eq!(page.items.len(), 4);
        assert!(page.items.iter().all(|v| v["kind"] == "odd"));
        assert!(page.next_cursor.is_some());

        let mut total = page.items.len();
        let mut cursor = page.next_cursor.map(Cursor::into_string);
        while let Some(c) = cursor {
            let page: CursorPage<Value> =
                paginator.list(Some("4"), Some(c.as_str()), filter.clone()).await.unwrap();
            assert!(page.items.len() <= 4);
            total += page.items.len();
            cursor = page.next_cursor.map(Cursor::into_string);
        }
        assert_eq!(total, 10);
    }

    #[tokio::test]
    async fn test_last_page_has_no_cursor() {
        let table = seeded(3).await;
        let paginator = CursorPaginator::new(table, PageLimits::default());

        let page: CursorPage<Value> = paginator.list(None, None, ScanFilter::new()).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_bad_cursor_never_restarts() {
        let table = seeded(3).await;
        let paginator = CursorPaginator::new(table, PageLimits::default());

        let result: PaginationResult<CursorPage<Value>> = paginator
            .list(None, Some("not-base64!!"), ScanFilter::new())
            .await;
        assert!(matches!(result, Err(PaginationError::BadCursor(_))));
    }

    #[tokio::test]
    async fn test_cursor_without_partition_key_is_bad() {
        let table = seeded(3).await;
        let paginator = CursorPaginator::new(table, PageLimits::default());

        let foreign = Cursor::encode(&crate::store::key_of("sku", "k001")).unwrap();
        let result: PaginationResult<CursorPage<Value>> = paginator
            .list(None, Some(foreign.as_str()), ScanFilter::new())
            .await;
        assert!(matches!(result, Err(PaginationError::BadCursor(_))));
    }

    #[tokio::test]
    async fn test_limit_checked_before_scan() {
        let table = seeded(3).await;
        let paginator = CursorPaginator::new(table, PageLimits::default());

        let result: PaginationResult<CursorPage<Value>> =
            paginator.list(Some("500"), None, ScanFilter::new()).await;
        assert!(matches!(result, Err(PaginationError::LimitExceeded { .. })));
    }
}
