//! # Lifecycle Manager
//!
//! The single place where "active only by default" is enforced. Every
//! ordinary lookup goes through [`Visibility::ActiveOnly`]; only
//! [`LifecycleManager::restore`] asks the store for deleted records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::store::{Condition, StoreError};

use super::state::{Lifecycle, DELETED_AT};

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Lifecycle errors
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    /// No record visible under the requested visibility
    #[error("{entity} not found")]
    NotFound { entity: &'static str, key: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which lifecycle states a lookup may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// `deletedAt IS NULL`
    ActiveOnly,

    /// Any state (restore path only)
    IncludeDeleted,
}

impl Visibility {
    /// Store condition implementing this visibility, if any
    pub fn condition(&self) -> Option<Condition> {
        match self {
            Visibility::ActiveOnly => Some(Condition::not_exists(DELETED_AT)),
            Visibility::IncludeDeleted => None,
        }
    }

    /// Check a record's state against this visibility
    pub fn admits(&self, lifecycle: &Lifecycle) -> bool {
        match self {
            Visibility::ActiveOnly => lifecycle.is_active(),
            Visibility::IncludeDeleted => true,
        }
    }
}

/// A record that carries a soft-delete lifecycle
pub trait SoftDeletable: Clone + Send + Sync + 'static {
    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;

    fn lifecycle(&self) -> &Lifecycle;

    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Record a modification time
    fn touch(&mut self, now: DateTime<Utc>);
}

/// Store lookups the lifecycle manager depends on
#[async_trait]
pub trait LifecycleStore<E: SoftDeletable>: Send + Sync {
    async fn find_by_id(&self, id: Uuid, visibility: Visibility) -> Result<Option<E>, StoreError>;

    async fn find_by_identification(
        &self,
        identification: &str,
        visibility: Visibility,
    ) -> Result<Option<E>, StoreError>;

    async fn save(&self, entity: E) -> Result<E, StoreError>;
}

/// Mediates every read and lifecycle transition for one entity type
pub struct LifecycleManager<E: SoftDeletable> {
    store: Arc<dyn LifecycleStore<E>>,
}

impl<E: SoftDeletable> Clone for LifecycleManager<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<E: SoftDeletable> LifecycleManager<E> {
    pub fn new(store: Arc<dyn LifecycleStore<E>>) -> Self {
        Self { store }
    }

    /// Active record by id
    pub async fn find_active(&self, id: Uuid) -> LifecycleResult<E> {
        self.store
            .find_by_id(id, Visibility::ActiveOnly)
            .await?
            .filter(|e| e.lifecycle().is_active())
            .ok_or_else(|| not_found::<E>(id.to_string()))
    }

    /// Active record by business identification
    pub async fn find_active_by_identification(&self, identification: &str) -> LifecycleResult<E> {
        self.store
            .find_by_identification(identification, Visibility::ActiveOnly)
            .await?
            .filter(|e| e.lifecycle().is_active())
            .ok_or_else(|| not_found::<E>(identification.to_string()))
    }

    /// ACTIVE -> DELETED. Deleted records are not visible to this lookup,
    /// so deleting twice reports `NotFound`.
    pub async fn soft_delete(&self, id: Uuid) -> LifecycleResult<()> {
        let mut entity = self.find_active(id).await?;
        let now = Utc::now();

        entity.lifecycle_mut().soft_delete(now);
        entity.touch(now);
        self.store.save(entity).await?;

        info!(entity = E::ENTITY, %id, "soft deleted");
        Ok(())
    }

    /// DELETED -> ACTIVE. Finds the record in any state; restoring an
    /// active record only refreshes its modification time.
    pub async fn restore(&self, id: Uuid) -> LifecycleResult<E> {
        let mut entity = self
            .store
            .find_by_id(id, Visibility::IncludeDeleted)
            .await?
            .ok_or_else(|| not_found::<E>(id.to_string()))?;

        let was_deleted = entity.lifecycle().is_deleted();
        entity.lifecycle_mut().restore();
        entity.touch(Utc::now());
        let saved = self.store.save(entity).await?;

        info!(entity = E::ENTITY, %id, was_deleted, "restored");
        Ok(saved)
    }
}

fn not_found<E: SoftDeletable>(key: String) -> LifecycleError {
    LifecycleError::NotFound {
        entity: E::ENTITY,
        key,
    }
}
