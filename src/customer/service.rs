//! # Customer Service
//!
//! Offset-paginated listing ordered newest first, plus the shared
//! create/read/update/lifecycle operations.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{ServiceError, ServiceResult};
use crate::lifecycle::{LifecycleManager, LifecycleStore, SoftDeletable, Visibility};
use crate::pagination::{OffsetPage, PageLimits, PageRequest};
use crate::status::EntityStatus;
use crate::store::{Condition, FindQuery, RelationalTable, ScanFilter, SortOrder};
use crate::validation::Validate;

use super::model::{CreateCustomer, Customer, UpdateCustomer};
use super::repository::CustomerRepository;

/// Offset page as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    pub customers: Vec<Customer>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl From<OffsetPage<Customer>> for CustomerPage {
    fn from(page: OffsetPage<Customer>) -> Self {
        Self {
            customers: page.items,
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<CustomerRepository>,
    lifecycle: LifecycleManager<Customer>,
    limits: PageLimits,
}

impl CustomerService {
    pub fn new(table: Arc<dyn RelationalTable<Customer>>, limits: PageLimits) -> Self {
        let repository = Arc::new(CustomerRepository::new(table));
        Self {
            lifecycle: LifecycleManager::new(repository.clone()),
            repository,
            limits,
        }
    }

    pub async fn create(&self, input: CreateCustomer) -> ServiceResult<Customer> {
        input.validate()?;

        let customer = self
            .repository
            .insert(Customer::from_create(input, Utc::now()))
            .await?;

        info!(id = %customer.id, identification = %customer.identification, "Customer created");
        Ok(customer)
    }

    /// One offset page of active customers, newest first.
    ///
    /// `page` and `limit` are raw query values.
    pub async fn list(
        &self,
        page: Option<&str>,
        limit: Option<&str>,
        status: Option<EntityStatus>,
    ) -> ServiceResult<CustomerPage> {
        let request = PageRequest::new(self.limits.parse_page(page)?, self.limits.parse_limit(limit)?);

        let mut criteria = ScanFilter::new();
        if let Some(active_only) = Visibility::ActiveOnly.condition() {
            criteria = criteria.and(active_only);
        }
        if let Some(status) = status {
            criteria = criteria.and(Condition::eq("status", status.as_str()));
        }

        let (customers, total) = self
            .repository
            .find_and_count(FindQuery {
                criteria,
                order: SortOrder::Descending,
                skip: request.skip(),
                take: request.limit,
            })
            .await?;

        debug!(page = request.page, limit = request.limit, total, "Customers listed");
        Ok(OffsetPage::new(customers, total, request).into())
    }

    pub async fn find_one(&self, id: &str) -> ServiceResult<Customer> {
        let id = ServiceError::parse_id(Customer::ENTITY, id)?;
        Ok(self.lifecycle.find_active(id).await?)
    }

    pub async fn find_by_identification(&self, identification: &str) -> ServiceResult<Customer> {
        Ok(self
            .lifecycle
            .find_active_by_identification(identification)
            .await?)
    }

    pub async fn update(&self, id: &str, patch: UpdateCustomer) -> ServiceResult<Customer> {
        patch.validate()?;
        let mut customer = self.find_one(id).await?;

        customer.apply(patch, Utc::now());
        let customer = self.repository.save(customer).await?;

        info!(id = %customer.id, "Customer updated");
        Ok(customer)
    }

    pub async fn soft_delete(&self, id: &str) -> ServiceResult<()> {
        let id = ServiceError::parse_id(Customer::ENTITY, id)?;
        self.lifecycle.soft_delete(id).await?;
        Ok(())
    }

    pub async fn restore(&self, id: &str) -> ServiceResult<Customer> {
        let id = ServiceError::parse_id(Customer::ENTITY, id)?;
        Ok(self.lifecycle.restore(id).await?)
    }

    /// Store reachability for health checks
    pub async fn probe(&self) -> ServiceResult<()> {
        self.repository
            .find_and_count(FindQuery {
                take: 1,
                ..Default::default()
            })
            .await?;
        Ok(())
    }
}
