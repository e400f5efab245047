//! Company persistence over a [`KvTable`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::lifecycle::{LifecycleStore, Visibility};
use crate::store::{key_of, KvTable, ScanFilter, ScanRequest, StoreError, StoreResult};

use super::model::Company;

/// Key-value table name
pub const COMPANY_TABLE: &str = "companies";

/// Partition key attribute
pub const PARTITION_KEY: &str = "id";

/// Secondary index over `identification`
pub const IDENTIFICATION_INDEX: &str = "identification-index";

pub struct CompanyRepository {
    table: Arc<dyn KvTable>,
}

impl CompanyRepository {
    pub fn new(table: Arc<dyn KvTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> Arc<dyn KvTable> {
        Arc::clone(&self.table)
    }

    /// Reject `identification` if any stored item other than `except`
    /// already uses it, deleted items included.
    pub async fn ensure_unique(&self, identification: &str, except: Option<Uuid>) -> StoreResult<()> {
        let clash = self
            .by_identification(identification)
            .await?
            .into_iter()
            .any(|company| Some(company.id) != except);

        if clash {
            return Err(StoreError::UniqueViolation {
                attribute: "identification".to_string(),
                value: identification.to_string(),
            });
        }
        Ok(())
    }

    /// One raw read to confirm the table answers
    pub async fn probe(&self) -> StoreResult<()> {
        self.table
            .scan(ScanRequest {
                filter: ScanFilter::new(),
                limit: 1,
                exclusive_start_key: None,
            })
            .await
            .map(|_| ())
    }

    async fn by_identification(&self, identification: &str) -> StoreResult<Vec<Company>> {
        self.table
            .query_by_index(IDENTIFICATION_INDEX, identification)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }
}

fn decode(item: Value) -> StoreResult<Company> {
    Ok(serde_json::from_value(item)?)
}

#[async_trait]
impl LifecycleStore<Company> for CompanyRepository {
    async fn find_by_id(&self, id: Uuid, visibility: Visibility) -> StoreResult<Option<Company>> {
        let item = self.table.get(&key_of(PARTITION_KEY, id.to_string())).await?;
        Ok(item
            .map(decode)
            .transpose()?
            .filter(|company| visibility.admits(&company.lifecycle)))
    }

    async fn find_by_identification(
        &self,
        identification: &str,
        visibility: Visibility,
    ) -> StoreResult<Option<Company>> {
        Ok(self
            .by_identification(identification)
            .await?
            .into_iter()
            .find(|company| visibility.admits(&company.lifecycle)))
    }

    async fn save(&self, company: Company) -> StoreResult<Company> {
        self.table.put(serde_json::to_value(&company)?).await?;
        Ok(company)
    }
}
