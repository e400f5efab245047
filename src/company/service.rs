//! # Company Service
//!
//! Create, read, update and lifecycle operations for companies. Listing is
//! cursor-paginated over the key-value table and always restricted to
//! active items.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{ServiceError, ServiceResult};
use crate::lifecycle::{LifecycleManager, LifecycleStore, SoftDeletable, Visibility};
use crate::pagination::{CursorPage, CursorPaginator, PageLimits};
use crate::status::EntityStatus;
use crate::store::{Condition, KvTable, ScanFilter};
use crate::validation::Validate;

use super::model::{Company, CreateCompany, UpdateCompany};
use super::repository::CompanyRepository;

/// Cursor page as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPage {
    pub companies: Vec<Company>,
    pub count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_key: Option<String>,
}

impl From<CursorPage<Company>> for CompanyPage {
    fn from(page: CursorPage<Company>) -> Self {
        Self {
            count: page.items.len(),
            companies: page.items,
            next_key: page.next_cursor.map(|c| c.into_string()),
        }
    }
}

#[derive(Clone)]
pub struct CompanyService {
    repository: Arc<CompanyRepository>,
    lifecycle: LifecycleManager<Company>,
    paginator: CursorPaginator,
}

impl CompanyService {
    pub fn new(table: Arc<dyn KvTable>, limits: PageLimits) -> Self {
        let repository = Arc::new(CompanyRepository::new(Arc::clone(&table)));
        Self {
            lifecycle: LifecycleManager::new(repository.clone()),
            paginator: CursorPaginator::new(table, limits),
            repository,
        }
    }

    pub async fn create(&self, input: CreateCompany) -> ServiceResult<Company> {
        input.validate()?;
        self.repository.ensure_unique(&input.identification, None).await?;

        let company = Company::from_create(input, Utc::now());
        let company = self.repository.save(company).await?;

        info!(id = %company.id, identification = %company.identification, "Company created");
        Ok(company)
    }

    /// One cursor page of active companies
    pub async fn list(
        &self,
        limit: Option<&str>,
        last_key: Option<&str>,
        status: Option<EntityStatus>,
    ) -> ServiceResult<CompanyPage> {
        let mut filter = ScanFilter::new();
        if let Some(active_only) = Visibility::ActiveOnly.condition() {
            filter = filter.and(active_only);
        }
        if let Some(status) = status {
            filter = filter.and(Condition::eq("status", status.as_str()));
        }

        let page: CursorPage<Company> = self.paginator.list(limit, last_key, filter).await?;
        debug!(
            returned = page.items.len(),
            has_more = page.next_cursor.is_some(),
            "Companies listed"
        );
        Ok(page.into())
    }

    pub async fn find_one(&self, id: &str) -> ServiceResult<Company> {
        let id = ServiceError::parse_id(Company::ENTITY, id)?;
        Ok(self.lifecycle.find_active(id).await?)
    }

    pub async fn find_by_identification(&self, identification: &str) -> ServiceResult<Company> {
        Ok(self
            .lifecycle
            .find_active_by_identification(identification)
            .await?)
    }

    pub async fn update(&self, id: &str, patch: UpdateCompany) -> ServiceResult<Company> {
        patch.validate()?;
        let mut company = self.find_one(id).await?;

        if let Some(identification) = patch.identification.as_deref() {
            if identification != company.identification {
                self.repository
                    .ensure_unique(identification, Some(company.id))
                    .await?;
            }
        }

        company.apply(patch, Utc::now());
        let company = self.repository.save(company).await?;

        info!(id = %company.id, "Company updated");
        Ok(company)
    }

    pub async fn soft_delete(&self, id: &str) -> ServiceResult<()> {
        let id = ServiceError::parse_id(Company::ENTITY, id)?;
        self.lifecycle.soft_delete(id).await?;
        Ok(())
    }

    pub async fn restore(&self, id: &str) -> ServiceResult<Company> {
        let id = ServiceError::parse_id(Company::ENTITY, id)?;
        Ok(self.lifecycle.restore(id).await?)
    }

    /// Store reachability for health checks
    pub async fn probe(&self) -> ServiceResult<()> {
        Ok(self.repository.probe().await?)
    }
}
