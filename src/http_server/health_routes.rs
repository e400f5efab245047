//! Health HTTP Routes
//!
//! Unauthenticated liveness and readiness endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::state::AppState;

/// Service name reported by health checks
pub const SERVICE_NAME: &str = "thryv-backend";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
}

/// Per-store reachability
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    pub key_value: String,
    pub relational: String,
}

/// Detailed health response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    #[serde(flatten)]
    pub summary: HealthResponse,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
    pub stores: StoreHealth,
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/detailed", get(detailed_health_handler))
}

fn summary(status: &str) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        service: SERVICE_NAME.to_string(),
    }
}

fn reachability<E>(probe: Result<(), E>) -> String {
    match probe {
        Ok(()) => "connected".to_string(),
        Err(_) => "unavailable".to_string(),
    }
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(summary("ok")))
}

/// Detailed health: probes both stores
async fn detailed_health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let key_value = state.companies.probe().await;
    let relational = state.customers.probe().await;
    let healthy = key_value.is_ok() && relational.is_ok();

    let response = DetailedHealthResponse {
        summary: summary(if healthy { "ok" } else { "degraded" }),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.environment.clone(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        stores: StoreHealth {
            key_value: reachability(key_value),
            relational: reachability(relational),
        },
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
