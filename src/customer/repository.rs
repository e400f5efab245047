//! Customer persistence over a [`RelationalTable`].

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::lifecycle::{LifecycleStore, Visibility};
use crate::store::{Condition, FindQuery, RelationalTable, ScanFilter, StoreResult};

use super::model::Customer;

pub struct CustomerRepository {
    table: Arc<dyn RelationalTable<Customer>>,
}

impl CustomerRepository {
    pub fn new(table: Arc<dyn RelationalTable<Customer>>) -> Self {
        Self { table }
    }

    /// Insert a new row; duplicate identifications are rejected by the table
    pub async fn insert(&self, customer: Customer) -> StoreResult<Customer> {
        self.table.insert(customer).await
    }

    pub async fn find_and_count(&self, query: FindQuery) -> StoreResult<(Vec<Customer>, usize)> {
        self.table.find_and_count(query).await
    }

    async fn find_where(&self, condition: Condition, visibility: Visibility) -> StoreResult<Option<Customer>> {
        let mut criteria = ScanFilter::new().and(condition);
        if let Some(lifecycle) = visibility.condition() {
            criteria = criteria.and(lifecycle);
        }
        self.table.find_one(&criteria).await
    }
}

#[async_trait]
impl LifecycleStore<Customer> for CustomerRepository {
    async fn find_by_id(&self, id: Uuid, visibility: Visibility) -> StoreResult<Option<Customer>> {
        self.find_where(Condition::eq("id", id.to_string()), visibility)
            .await
    }

    async fn find_by_identification(
        &self,
        identification: &str,
        visibility: Visibility,
    ) -> StoreResult<Option<Customer>> {
        self.find_where(Condition::eq("identification", identification), visibility)
            .await
    }

    async fn save(&self, customer: Customer) -> StoreResult<Customer> {
        self.table.save(customer).await
    }
}
