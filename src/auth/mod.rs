//! # Auth Module
//!
//! Bearer-token guard for the HTTP API: HS256 JWT generation and
//! validation, and the [`CallerIdentity`] extractor handlers use to
//! require an authenticated caller.

pub mod errors;
pub mod identity;
pub mod jwt;

pub use errors::{AuthError, AuthResult};
pub use identity::CallerIdentity;
pub use jwt::{JwtClaims, JwtConfig, JwtManager, TokenResponse};
