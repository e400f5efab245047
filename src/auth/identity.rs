//! # Caller Identity
//!
//! The verified identity of an API caller, extracted from the
//! `Authorization: Bearer <jwt>` header before any handler runs.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtClaims, JwtManager};

/// Trusted caller identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub subject: String,
    pub email: Option<String>,
}

impl From<JwtClaims> for CallerIdentity {
    fn from(claims: JwtClaims) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
        }
    }
}

impl CallerIdentity {
    /// Resolve the identity carried by request headers
    pub fn from_headers(jwt: &JwtManager, headers: &HeaderMap) -> AuthResult<Self> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::AuthenticationRequired)?;

        Ok(jwt.validate_token(token)?.into())
    }
}

/// Token from a `Bearer` credential; the scheme name is case-insensitive
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim_start().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    Arc<JwtManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt = Arc::<JwtManager>::from_ref(state);
        CallerIdentity::from_headers(&jwt, &parts.headers)
    }
}
