//! # Relational Table
//!
//! Typed rows with a UUID primary key, unique columns, and `WHERE`-style
//! criteria expressed as [`ScanFilter`] conditions over the row's JSON
//! projection (the same column names the API exposes).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::filter::ScanFilter;

/// A row stored in a relational table
pub trait Row: Serialize + Clone + Send + Sync + 'static {
    /// Table name, used in diagnostics
    const TABLE: &'static str;

    /// Primary key
    fn id(&self) -> Uuid;

    /// Creation timestamp, the default sort column
    fn created_at(&self) -> DateTime<Utc>;

    /// `(column, value)` pairs that must be unique across the table
    fn unique_columns(&self) -> Vec<(&'static str, String)>;
}

/// Sort direction on the creation column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// `findAndCount`-style query
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub criteria: ScanFilter,
    pub order: SortOrder,
    pub skip: usize,
    pub take: usize,
}

/// Relational table primitives
#[async_trait]
pub trait RelationalTable<R: Row>: Send + Sync {
    /// Insert a new row; fails if the id or a unique column already exists
    async fn insert(&self, row: R) -> StoreResult<R>;

    /// Insert or update a row by primary key
    async fn save(&self, row: R) -> StoreResult<R>;

    /// First row matching the criteria, in creation order
    async fn find_one(&self, criteria: &ScanFilter) -> StoreResult<Option<R>>;

    /// One window of matching rows plus the total match count
    async fn find_and_count(&self, query: FindQuery) -> StoreResult<(Vec<R>, usize)>;
}

/// In-process relational table
pub struct InMemoryRelationalTable<R: Row> {
    rows: RwLock<HashMap<Uuid, R>>,
}

impl<R: Row> InMemoryRelationalTable<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn check_unique(rows: &HashMap<Uuid, R>, row: &R) -> StoreResult<()> {
        for (column, value) in row.unique_columns() {
            let clash = rows.values().any(|other| {
                other.id() != row.id()
                    && other
                        .unique_columns()
                        .iter()
                        .any(|(c, v)| *c == column && *v == value)
            });
            if clash {
                return Err(StoreError::UniqueViolation {
                    attribute: column.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Matching rows sorted by creation time, ties broken by id
    fn select(&self, criteria: &ScanFilter, order: SortOrder) -> StoreResult<Vec<R>> {
        let rows = self.rows.read().map_err(|_| StoreError::poisoned(R::TABLE))?;

        let mut selected = Vec::new();
        for row in rows.values() {
            let projection: Value = serde_json::to_value(row)?;
            if criteria.matches(&projection) {
                selected.push(row.clone());
            }
        }

        selected.sort_by(|a, b| {
            let by_time = a
                .created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()));
            match order {
                SortOrder::Ascending => by_time,
                SortOrder::Descending => by_time.reverse(),
            }
        });
        Ok(selected)
    }
}

impl<R: Row> Default for InMemoryRelationalTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Row> RelationalTable<R> for InMemoryRelationalTable<R> {
    async fn insert(&self, row: R) -> StoreResult<R> {
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned(R::TABLE))?;

        if rows.contains_key(&row.id()) {
            return Err(StoreError::UniqueViolation {
                attribute: "id".to_string(),
                value: row.id().to_string(),
            });
        }
        Self::check_unique(&rows, &row)?;

        rows.insert(row.id(), row.clone());
        Ok(row)
    }

    async fn save(&self, row: R) -> StoreResult<R> {
        let mut rows = self.rows.write().map_err(|_| StoreError::poisoned(R::TABLE))?;
        Self::check_unique(&rows, &row)?;
        rows.insert(row.id(), row.clone());
        Ok(row)
    }

    async fn find_one(&self, criteria: &ScanFilter) -> StoreResult<Option<R>> {
        Ok(self
            .select(criteria, SortOrder::Ascending)?
            .into_iter()
            .next())
    }

    async fn find_and_count(&self, query: FindQuery) -> StoreResult<(Vec<R>, usize)> {
        let selected = self.select(&query.criteria, query.order)?;
        let total = selected.len();
        let window = selected
            .into_iter()
            .skip(query.skip)
            .take(query.take)
            .collect();
        Ok((window, total))
    }
}
