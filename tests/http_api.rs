//! HTTP API Tests
//!
//! Drives the full router (auth guard, JSON bodies, status codes) with
//! `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use thryv_backend::auth::JwtManager;
use thryv_backend::config::AppConfig;
use thryv_backend::http_server::{build_router, AppState};

fn app() -> (Router, String) {
    let config = AppConfig::default();
    let token = JwtManager::new(config.auth.jwt_config())
        .generate_token("test-suite", Some("qa@example.com".to_string()))
        .unwrap();
    let router = build_router(&config.http, AppState::in_memory(&config));
    (router, token)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// =============================================================================
// AUTH GUARD
// =============================================================================

/// Resource routes reject requests without a valid bearer token.
#[tokio::test]
async fn test_unauthenticated_requests_rejected() {
    let (router, _) = app();

    for uri in ["/companies", "/customers"] {
        let (status, body) = send(&router, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], 401);
    }

    let (status, _) = send(&router, Method::GET, "/companies", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Health endpoints are public.
#[tokio::test]
async fn test_health_is_public() {
    let (router, _) = app();

    let (status, body) = send(&router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "thryv-backend");

    let (status, body) = send(&router, Method::GET, "/health/detailed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], "development");
    assert_eq!(body["stores"]["keyValue"], "connected");
    assert_eq!(body["stores"]["relational"], "connected");
}

// =============================================================================
// COMPANY ROUND TRIP
// =============================================================================

#[tokio::test]
async fn test_company_crud_round_trip() {
    let (router, token) = app();
    let token = Some(token.as_str());

    let (status, created) = send(
        &router,
        Method::POST,
        "/companies",
        token,
        Some(json!({ "identification": "ACME-001", "name": "Acme", "alias": "ACME" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PENDING");
    assert!(created.get("deletedAt").is_none());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&router, Method::GET, &format!("/companies/{}", id), token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, by_ident) = send(
        &router,
        Method::GET,
        "/companies/identification/ACME-001",
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_ident["id"], created["id"]);

    let (status, updated) = send(
        &router,
        Method::PUT,
        &format!("/companies/{}", id),
        token,
        Some(json!({ "status": "ACTIVE" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "ACTIVE");
    assert_eq!(updated["name"], "Acme");

    let (status, page) = send(&router, Method::GET, "/companies?limit=5&status=ACTIVE", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["count"], 1);
    assert!(page.get("nextKey").is_none());

    let (status, _) = send(&router, Method::DELETE, &format!("/companies/{}", id), token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, Method::GET, &format!("/companies/{}", id), token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, restored) = send(
        &router,
        Method::PATCH,
        &format!("/companies/{}/restore", id),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["id"], created["id"]);
}

/// Client errors map to their status codes with an error body.
#[tokio::test]
async fn test_company_client_errors() {
    let (router, token) = app();
    let token = Some(token.as_str());

    let (status, body) = send(
        &router,
        Method::POST,
        "/companies",
        token,
        Some(json!({ "identification": "", "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("identification"));

    let (status, _) = send(&router, Method::GET, "/companies?lastKey=not-base64!!", token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::GET, "/companies?limit=1000", token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::GET, "/companies?status=ARCHIVED", token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::GET, "/companies/not-a-uuid", token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// CUSTOMER ROUND TRIP
// =============================================================================

#[tokio::test]
async fn test_customer_crud_round_trip() {
    let (router, token) = app();
    let token = Some(token.as_str());

    let (status, created) = send(
        &router,
        Method::POST,
        "/customers",
        token,
        Some(json!({
            "identification": "0102030405",
            "name": "Ana",
            "lastname": "Torres",
            "dateBorn": "1992-07-01",
            "gender": "FEMALE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["deletedAt"], Value::Null);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, duplicate) = send(
        &router,
        Method::POST,
        "/customers",
        token,
        Some(json!({
            "identification": "0102030405",
            "name": "Other",
            "lastname": "Person",
            "dateBorn": "1990-01-01",
            "gender": "MALE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(duplicate["code"], 409);

    let (status, page) = send(&router, Method::GET, "/customers?page=1&limit=10", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["customers"][0]["id"], created["id"]);

    let (status, updated) = send(
        &router,
        Method::PUT,
        &format!("/customers/{}", id),
        token,
        Some(json!({ "lastname": "Torres Vega" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["lastname"], "Torres Vega");

    let (status, _) = send(&router, Method::DELETE, &format!("/customers/{}", id), token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, page) = send(&router, Method::GET, "/customers", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);

    let (status, restored) = send(
        &router,
        Method::PATCH,
        &format!("/customers/{}/restore", id),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["deletedAt"], Value::Null);
    assert_eq!(restored["lastname"], "Torres Vega");

    let (status, _) = send(&router, Method::GET, "/customers?page=0", token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
