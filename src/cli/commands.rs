//! CLI command implementations

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::auth::{JwtManager, TokenResponse};
use crate::config::AppConfig;
use crate::http_server::{AppState, HttpServer};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Execute a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Token {
            subject,
            email,
            config,
        } => token(config.as_deref(), &subject, email, &mut std::io::stdout()),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

/// Run the HTTP server until a shutdown signal arrives
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    info!(
        environment = %config.environment,
        addr = %config.http.socket_addr(),
        max_limit = config.pagination.max_limit,
        "Starting thryv-backend"
    );

    let state = AppState::in_memory(&config);
    let server = HttpServer::new(config.http.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print a freshly minted bearer token as JSON
pub fn token<W: Write>(
    config_path: Option<&Path>,
    subject: &str,
    email: Option<String>,
    out: &mut W,
) -> CliResult<()> {
    let config = load_config(config_path)?;
    let jwt = JwtManager::new(config.auth.jwt_config());

    let expires_at = jwt.get_expiration();
    let access_token = jwt.generate_token(subject, email)?;

    serde_json::to_writer_pretty(&mut *out, &TokenResponse::new(access_token, expires_at))?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_command_output_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"auth": {{"secret": "cli-test-secret"}}}}"#).unwrap();

        let mut out = Vec::new();
        token(Some(file.path()), "ops", None, &mut out).unwrap();

        let response: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(response["token_type"], "bearer");

        let config = AppConfig::load(file.path()).unwrap();
        let jwt = JwtManager::new(config.auth.jwt_config());
        let claims = jwt
            .validate_token(response["access_token"].as_str().unwrap())
            .unwrap();
        assert_eq!(claims.sub, "ops");
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let err = token(
            Some(Path::new("/nonexistent/thryv.json")),
            "ops",
            None,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err.code(), &crate::cli::CliErrorCode::ConfigError);
    }
}
