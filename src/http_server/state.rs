//! Shared router state.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;

use crate::auth::JwtManager;
use crate::company::{CompanyService, COMPANY_TABLE, IDENTIFICATION_INDEX, PARTITION_KEY};
use crate::config::AppConfig;
use crate::customer::{Customer, CustomerService};
use crate::store::{InMemoryKvTable, InMemoryRelationalTable};

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub companies: CompanyService,
    pub customers: CustomerService,
    pub jwt: Arc<JwtManager>,
    pub environment: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        companies: CompanyService,
        customers: CustomerService,
        jwt: JwtManager,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            companies,
            customers,
            jwt: Arc::new(jwt),
            environment: environment.into(),
            started_at: Instant::now(),
        }
    }

    /// Services backed by the in-process store adapters
    pub fn in_memory(config: &AppConfig) -> Self {
        let company_table = InMemoryKvTable::new(COMPANY_TABLE, PARTITION_KEY)
            .with_unique_index(IDENTIFICATION_INDEX, "identification");
        let customer_table: InMemoryRelationalTable<Customer> = InMemoryRelationalTable::new();

        Self::new(
            CompanyService::new(Arc::new(company_table), config.pagination),
            CustomerService::new(Arc::new(customer_table), config.pagination),
            JwtManager::new(config.auth.jwt_config()),
            config.environment.clone(),
        )
    }
}

impl FromRef<AppState> for Arc<JwtManager> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.jwt)
    }
}
