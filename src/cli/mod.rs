//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - token: Mint a development bearer token

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve, token};
pub use errors::{CliError, CliErrorCode, CliResult};
