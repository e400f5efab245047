//! Company HTTP Routes
//!
//! `/companies` endpoints. Every route requires a bearer token.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::auth::CallerIdentity;
use crate::company::{Company, CompanyPage, CreateCompany, UpdateCompany};
use crate::errors::ServiceResult;
use crate::status::EntityStatus;

use super::state::AppState;

/// `GET /companies` query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCompaniesQuery {
    pub limit: Option<String>,
    pub last_key: Option<String>,
    pub status: Option<String>,
}

/// Create company routes
pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/:id/restore", patch(restore_company))
        .route("/identification/:identification", get(get_company_by_identification))
}

async fn create_company(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(body): Json<CreateCompany>,
) -> ServiceResult<(StatusCode, Json<Company>)> {
    let company = state.companies.create(body).await?;
    info!(caller = %caller.subject, id = %company.id, "POST /companies");
    Ok((StatusCode::CREATED, Json(company)))
}

async fn list_companies(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Query(query): Query<ListCompaniesQuery>,
) -> ServiceResult<Json<CompanyPage>> {
    let status = EntityStatus::from_query(query.status.as_deref())?;
    let page = state
        .companies
        .list(query.limit.as_deref(), query.last_key.as_deref(), status)
        .await?;
    Ok(Json(page))
}

async fn get_company(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Path(id): Path<String>,
) -> ServiceResult<Json<Company>> {
    Ok(Json(state.companies.find_one(&id).await?))
}

async fn get_company_by_identification(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Path(identification): Path<String>,
) -> ServiceResult<Json<Company>> {
    Ok(Json(
        state.companies.find_by_identification(&identification).await?,
    ))
}

async fn update_company(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    Json(body): Json<UpdateCompany>,
) -> ServiceResult<Json<Company>> {
    let company = state.companies.update(&id, body).await?;
    info!(caller = %caller.subject, %id, "PUT /companies/:id");
    Ok(Json(company))
}

async fn delete_company(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> ServiceResult<StatusCode> {
    state.companies.soft_delete(&id).await?;
    info!(caller = %caller.subject, %id, "DELETE /companies/:id");
    Ok(StatusCode::NO_CONTENT)
}

async fn restore_company(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> ServiceResult<Json<Company>> {
    let company = state.companies.restore(&id).await?;
    info!(caller = %caller.subject, %id, "PATCH /companies/:id/restore");
    Ok(Json(company))
}
