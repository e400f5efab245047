//! Customer HTTP Routes

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::auth::CallerIdentity;
use crate::customer::{CreateCustomer, Customer, CustomerPage, UpdateCustomer};
use crate::errors::ServiceResult;
use crate::status::EntityStatus;

use super::state::AppState;

/// `GET /customers` query string
#[derive(Debug, Default, Deserialize)]
pub struct ListCustomersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
}

/// Create customer routes
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/:id/restore", patch(restore_customer))
        .route("/identification/:identification", get(get_customer_by_identification))
}

async fn create_customer(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(body): Json<CreateCustomer>,
) -> ServiceResult<(StatusCode, Json<Customer>)> {
    let customer = state.customers.create(body).await?;
    info!(caller = %caller.subject, id = %customer.id, "POST /customers");
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn list_customers(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Query(query): Query<ListCustomersQuery>,
) -> ServiceResult<Json<CustomerPage>> {
    let status = EntityStatus::from_query(query.status.as_deref())?;
    let page = state
        .customers
        .list(query.page.as_deref(), query.limit.as_deref(), status)
        .await?;
    Ok(Json(page))
}

async fn get_customer(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Path(id): Path<String>,
) -> ServiceResult<Json<Customer>> {
    Ok(Json(state.customers.find_one(&id).await?))
}

async fn get_customer_by_identification(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Path(identification): Path<String>,
) -> ServiceResult<Json<Customer>> {
    Ok(Json(
        state.customers.find_by_identification(&identification).await?,
    ))
}

async fn update_customer(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    Json(body): Json<UpdateCustomer>,
) -> ServiceResult<Json<Customer>> {
    let customer = state.customers.update(&id, body).await?;
    info!(caller = %caller.subject, %id, "PUT /customers/:id");
    Ok(Json(customer))
}

async fn delete_customer(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> ServiceResult<StatusCode> {
    state.customers.soft_delete(&id).await?;
    info!(caller = %caller.subject, %id, "DELETE /customers/:id");
    Ok(StatusCode::NO_CONTENT)
}

async fn restore_customer(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> ServiceResult<Json<Customer>> {
    let customer = state.customers.restore(&id).await?;
    info!(caller = %caller.subject, %id, "PATCH /customers/:id/restore");
    Ok(Json(customer))
}
