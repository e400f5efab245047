//! # Application Configuration
//!
//! Loaded from a JSON file; every field has a default so an empty object
//! is a valid config. A handful of environment variables override the file
//! after loading:
//!
//! | Variable           | Field            |
//! |--------------------|------------------|
//! | `THRYV_JWT_SECRET` | `auth.secret`    |
//! | `THRYV_PORT`       | `http.port`      |
//! | `THRYV_ENV`        | `environment`    |

use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::JwtConfig;
use crate::http_server::HttpServerConfig;
use crate::pagination::PageLimits;

pub const ENV_JWT_SECRET: &str = "THRYV_JWT_SECRET";
pub const ENV_PORT: &str = "THRYV_PORT";
pub const ENV_ENVIRONMENT: &str = "THRYV_ENV";

const LOCAL_ENVIRONMENTS: [&str; 2] = ["development", "test"];

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Bearer-token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_secret")]
    pub secret: String,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_audience")]
    pub audience: String,

    /// Lifetime of tokens minted by the `token` command
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

fn default_secret() -> String {
    JwtConfig::default().secret
}

fn default_issuer() -> String {
    JwtConfig::default().issuer
}

fn default_audience() -> String {
    JwtConfig::default().audience
}

fn default_token_ttl_minutes() -> i64 {
    60
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            issuer: default_issuer(),
            audience: default_audience(),
            token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}

impl AuthSettings {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.secret.clone(),
            access_token_ttl: Duration::minutes(self.token_ttl_minutes),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub pagination: PageLimits,

    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            auth: AuthSettings::default(),
            pagination: PageLimits::default(),
            environment: default_environment(),
        }
    }
}

impl AppConfig {
    /// Load from file, apply environment overrides, validate
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&content)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = AppConfig::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable source
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup(ENV_JWT_SECRET) {
            self.auth.secret = secret;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_PORT, format!("'{}' is not a port", port)))?;
        }
        if let Some(environment) = lookup(ENV_ENVIRONMENT) {
            self.environment = environment;
        }
        Ok(())
    }

    /// Development and test environments may run with the built-in secret
    pub fn is_local(&self) -> bool {
        LOCAL_ENVIRONMENTS
            .iter()
            .any(|env| self.environment.trim().eq_ignore_ascii_case(env))
    }

    /// Validate field ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.auth.secret.is_empty() {
            return Err(ConfigError::invalid("auth.secret", "must not be empty"));
        }
        if self.auth.secret == default_secret() && !self.is_local() {
            return Err(ConfigError::invalid(
                "auth.secret",
                format!(
                    "the built-in secret is only allowed in development or test (environment is '{}'); set {}",
                    self.environment, ENV_JWT_SECRET
                ),
            ));
        }
        if self.auth.token_ttl_minutes <= 0 {
            return Err(ConfigError::invalid("auth.token_ttl_minutes", "must be > 0"));
        }
        if self.pagination.max_limit == 0 {
            return Err(ConfigError::invalid("pagination.max_limit", "must be > 0"));
        }
        if self.pagination.default_limit == 0
            || self.pagination.default_limit > self.pagination.max_limit
        {
            return Err(ConfigError::invalid(
                "pagination.default_limit",
                "must be between 1 and pagination.max_limit",
            ));
        }
        if self.environment.trim().is_empty() {
            return Err(ConfigError::invalid("environment", "must not be empty"));
        }
        Ok(())
    }
}
