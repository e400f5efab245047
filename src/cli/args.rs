//! CLI argument definitions using clap
//!
//! Commands:
//! - thryv-backend serve [--config <path>] [--port <port>]
//! - thryv-backend token --subject <id> [--email <email>] [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Company and Customer registry API
#[derive(Parser, Debug)]
#[command(name = "thryv-backend")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Path to configuration file (defaults plus environment if omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overrides the config file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Mint a bearer token signed with the configured secret
    Token {
        /// Subject claim
        #[arg(long)]
        subject: String,

        /// Optional email claim
        #[arg(long)]
        email: Option<String>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
