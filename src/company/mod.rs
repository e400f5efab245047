//! # Company
//!
//! Companies are stored in a key-value table with an `identification`
//! secondary index and listed through cursor pagination.

pub mod model;
pub mod repository;
pub mod service;

pub use model::{Company, CreateCompany, UpdateCompany};
pub use repository::{CompanyRepository, COMPANY_TABLE, IDENTIFICATION_INDEX, PARTITION_KEY};
pub use service::{CompanyPage, CompanyService};
