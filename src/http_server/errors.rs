//! # HTTP Error Rendering
//!
//! Service and auth errors are rendered as `{ "error": message, "code":
//! status }`. Client errors are logged at `warn`, server errors at `error`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::auth::AuthError;
use crate::errors::ServiceError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

fn render(code: u16, message: String, client_error: bool) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if client_error {
        warn!(status = code, error = %message, "Request rejected");
    } else {
        error!(status = code, error = %message, "Request failed");
    }
    (status, Json(ErrorResponse { error: message, code })).into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        render(self.status_code(), self.to_string(), self.is_client_error())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        render(self.status_code(), self.to_string(), self.is_client_error())
    }
}
