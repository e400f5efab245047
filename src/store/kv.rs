//! # Key-Value Table
//!
//! Items are JSON objects addressed by a single string partition key.
//! Scans walk the table in key order, read at most `limit` raw items, apply
//! the filter to what was read, and report the last key read so a caller can
//! resume with it as the exclusive start key. That order is an artifact of
//! this adapter; callers must only rely on completeness.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::filter::ScanFilter;

/// Primary key attribute map (the shape of `LastEvaluatedKey`)
pub type Key = Map<String, Value>;

/// Scan parameters
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    /// Applied after reading, does not count towards `limit`
    pub filter: ScanFilter,

    /// Maximum raw items to read
    pub limit: usize,

    /// Resume strictly after this key
    pub exclusive_start_key: Option<Key>,
}

/// One page of raw scan output
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Items that passed the filter
    pub items: Vec<Value>,

    /// Raw items read before filtering
    pub scanned_count: usize,

    /// Present when more raw items remain after this page
    pub last_evaluated_key: Option<Key>,
}

/// Key-value table primitives
#[async_trait]
pub trait KvTable: Send + Sync {
    /// Table name
    fn name(&self) -> &str;

    /// Name of the partition key attribute
    fn partition_key(&self) -> &str;

    /// Fetch an item by primary key
    async fn get(&self, key: &Key) -> StoreResult<Option<Value>>;

    /// Insert or replace an item (last writer wins). Fails with
    /// [`StoreError::UniqueViolation`] if another item already holds a value
    /// of a unique attribute; the check and the write are one atomic step.
    async fn put(&self, item: Value) -> StoreResult<()>;

    /// Read one page of the table
    async fn scan(&self, request: ScanRequest) -> StoreResult<ScanOutput>;

    /// Look up items through a secondary index
    async fn query_by_index(&self, index_name: &str, value: &str) -> StoreResult<Vec<Value>>;

    /// Remove an item, returning whether it existed
    async fn delete(&self, key: &Key) -> StoreResult<bool>;
}

/// Build a single-attribute key
pub fn key_of(attribute: &str, value: impl Into<String>) -> Key {
    let mut key = Map::new();
    key.insert(attribute.to_string(), Value::String(value.into()));
    key
}

/// In-process key-value table with hash-key semantics and
/// projection-ALL secondary indexes.
pub struct InMemoryKvTable {
    name: String,
    partition_key: String,
    /// index name -> indexed attribute
    indexes: HashMap<String, String>,
    /// attributes no two items may share
    unique: HashSet<String>,
    items: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryKvTable {
    pub fn new(name: impl Into<String>, partition_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition_key: partition_key.into(),
            indexes: HashMap::new(),
            unique: HashSet::new(),
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Declare a secondary index over `attribute`
    pub fn with_index(mut self, index_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.indexes.insert(index_name.into(), attribute.into());
        self
    }

    /// Declare a secondary index whose attribute is unique across the table
    pub fn with_unique_index(
        mut self,
        index_name: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        let attribute = attribute.into();
        self.unique.insert(attribute.clone());
        self.with_index(index_name, attribute)
    }

    /// Number of stored items
    pub fn len(&self) -> StoreResult<usize> {
        let items = self.items.read().map_err(|_| StoreError::poisoned(&self.name))?;
        Ok(items.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn key_value<'a>(&self, key: &'a Key) -> StoreResult<&'a str> {
        key.get(&self.partition_key)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StoreError::MalformedItem(format!(
                    "key is missing string attribute '{}'",
                    self.partition_key
                ))
            })
    }
}

#[async_trait]
impl KvTable for InMemoryKvTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn partition_key(&self) -> &str {
        &self.partition_key
    }

    async fn get(&self, key: &Key) -> StoreResult<Option<Value>> {
        let id = self.key_value(key)?;
        let items = self.items.read().map_err(|_| StoreError::poisoned(&self.name))?;
        Ok(items.get(id).cloned())
    }

    async fn put(&self, item: Value) -> StoreResult<()> {
        let id = item
            .get(&self.partition_key)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StoreError::MalformedItem(format!(
                    "item is missing string attribute '{}'",
                    self.partition_key
                ))
            })?
            .to_string();

        let mut items = self.items.write().map_err(|_| StoreError::poisoned(&self.name))?;
        for attribute in &self.unique {
            let Some(value) = item.get(attribute).and_then(Value::as_str) else {
                continue;
            };
            let taken = items.iter().any(|(other_id, other)| {
                *other_id != id && other.get(attribute).and_then(Value::as_str) == Some(value)
            });
            if taken {
                return Err(StoreError::UniqueViolation {
                    attribute: attribute.clone(),
                    value: value.to_string(),
                });
            }
        }
        items.insert(id, item);
        Ok(())
    }

    async fn scan(&self, request: ScanRequest) -> StoreResult<ScanOutput> {
        if request.limit == 0 {
            return Err(StoreError::InvalidRequest(
                "scan limit must be greater than 0".to_string(),
            ));
        }

        let start = match &request.exclusive_start_key {
            Some(key) => Bound::Excluded(self.key_value(key)?),
            None => Bound::Unbounded,
        };

        let items = self.items.read().map_err(|_| StoreError::poisoned(&self.name))?;
        let mut range = items.range::<str, _>((start, Bound::Unbounded));

        let mut output = ScanOutput::default();
        let mut last_read = None;

        for (id, item) in range.by_ref().take(request.limit) {
            output.scanned_count += 1;
            last_read = Some(id);
            if request.filter.matches(item) {
                output.items.push(item.clone());
            }
        }

        if range.next().is_some() {
            output.last_evaluated_key = last_read.map(|id| key_of(&self.partition_key, id.as_str()));
        }

        Ok(output)
    }

    async fn query_by_index(&self, index_name: &str, value: &str) -> StoreResult<Vec<Value>> {
        let attribute = self
            .indexes
            .get(index_name)
            .ok_or_else(|| StoreError::UnknownIndex(index_name.to_string()))?;

        let items = self.items.read().map_err(|_| StoreError::poisoned(&self.name))?;
        Ok(items
            .values()
            .filter(|item| item.get(attribute).and_then(Value::as_str) == Some(value))
            .cloned()
            .collect())
    }

    async fn delete(&self, key: &Key) -> StoreResult<bool> {
        let id = self.key_value(key)?;
        let mut items = self.items.write().map_err(|_| StoreError::poisoned(&self.name))?;
        Ok(items.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::filter::Condition;
    use serde_json::json;

    fn table_with(ids: &[&str]) -> InMemoryKvTable {
        let table = InMemoryKvTable::new("company-table", "id")
            .with_index("identification-index", "identification");
        {
            let mut items = table.items.write().unwrap();
            for (i, id) in ids.iter().enumerate() {
                let status = if i % 2 == 0 { "ACTIVE" } else { "PENDING" };
                items.insert(
                    id.to_string(),
                    json!({"id": id, "identification": format!("ID-{}", id), "status": status}),
                );
            }
        }
        table
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let table = InMemoryKvTable::new("t", "id");
        table.put(json!({"id": "a", "name": "Alpha"})).await.unwrap();

        let found = table.get(&key_of("id", "a")).await.unwrap();
        assert_eq!(found.unwrap()["name"], "Alpha");

        assert!(table.delete(&key_of("id", "a")).await.unwrap());
        assert!(!table.delete(&key_of("id", "a")).await.unwrap());
        assert!(table.get(&key_of("id", "a")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_requires_partition_key() {
        let table = InMemoryKvTable::new("t", "id");
        let result = table.put(json!({"name": "no id"})).await;
        assert!(matches!(result, Err(StoreError::MalformedItem(_))));
    }

    #[tokio::test]
    async fn test_scan_pages_resume_after_last_key() {
        let table = table_with(&["a", "b", "c", "d", "e"]);

        let first = table
            .scan(ScanRequest { limit: 2, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(first.scanned_count, 2);
        let key = first.last_evaluated_key.unwrap();
        assert_eq!(key, key_of("id", "b"));

        let rest = table
            .scan(ScanRequest {
                limit: 10,
                exclusive_start_key: Some(key),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(rest.scanned_count, 3);
        assert!(rest.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_scan_filters_after_limit() {
        let table = table_with(&["a", "b", "c", "d"]);

        let page = table
            .scan(ScanRequest {
                filter: ScanFilter::new().and(Condition::eq("status", "PENDING")),
                limit: 2,
                exclusive_start_key: None,
            })
            .await
            .unwrap();

        // Two raw items read, only "b" passes
        assert_eq!(page.scanned_count, 2);
        assert_eq!(page.items.len(), 1);
        assert!(page.last_evaluated_key.is_some());
    }

    #[tokio::test]
    async fn test_scan_exact_end_has_no_last_key() {
        let table = table_with(&["a", "b"]);
        let page = table
            .scan(ScanRequest { limit: 2, ..Default::default() })
            .await
            .unwrap();
        assert!(page.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_scan_rejects_zero_limit() {
        let table = table_with(&["a"]);
        let result = table.scan(ScanRequest::default()).await;
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_unique_index_rejects_second_holder() {
        let table = InMemoryKvTable::new("t", "id").with_unique_index("code-index", "code");
        table.put(json!({"id": "a", "code": "X-1"})).await.unwrap();

        // Rewriting the same item keeps its own value
        table.put(json!({"id": "a", "code": "X-1", "name": "again"})).await.unwrap();

        let result = table.put(json!({"id": "b", "code": "X-1"})).await;
        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation { ref attribute, .. }) if attribute == "code"
        ));
        assert!(table.get(&key_of("id", "b")).await.unwrap().is_none());
        assert_eq!(table.query_by_index("code-index", "X-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_query_by_index() {
        let table = table_with(&["a", "b"]);

        let hits = table.query_by_index("identification-index", "ID-b").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["id"], "b");

        let missing = table.query_by_index("other-index", "x").await;
        assert!(matches!(missing, Err(StoreError::UnknownIndex(_))));
    }
}
