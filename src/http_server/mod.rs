//! # HTTP Server Module
//!
//! Thin axum adapters over the Company and Customer services.
//!
//! # Endpoints
//!
//! - `/health`, `/health/detailed` - Health checks (no auth)
//! - `/companies/*` - Company CRUD, cursor pagination, soft delete/restore
//! - `/customers/*` - Customer CRUD, offset pagination, soft delete/restore

pub mod company_routes;
pub mod config;
pub mod customer_routes;
pub mod errors;
pub mod health_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::ErrorResponse;
pub use server::{build_router, HttpServer};
pub use state::AppState;
