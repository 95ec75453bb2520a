//! CLI command definitions for the `cguide` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod migrate;
pub mod token;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Career guide chat backend.
#[derive(Parser)]
#[command(name = "cguide", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as newline-delimited JSON.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.toml (default: $CAREERGUIDE_CONFIG or <data dir>/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the RPC API server.
    Serve {
        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Create or upgrade the database schema and list applied migrations.
    Migrate,

    /// Bearer token utilities.
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum TokenCommand {
    /// Mint a signed development token with the configured secret.
    Issue {
        /// Subject (external user id).
        #[arg(long)]
        subject: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        name: Option<String>,

        /// Lifetime in seconds; omit for a token that never expires.
        #[arg(long)]
        ttl_secs: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_token_issue() {
        let cli = Cli::try_parse_from([
            "cguide", "-v", "token", "issue", "--subject", "user_1", "--ttl-secs", "3600",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Token {
                action: TokenCommand::Issue {
                    subject, ttl_secs, ..
                },
            } => {
                assert_eq!(subject, "user_1");
                assert_eq!(ttl_secs, Some(3600));
            }
            _ => panic!("expected token issue"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["cguide", "serve", "--port", "8080", "--json-logs"]).unwrap();
        assert!(cli.json_logs);
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(8080));
                assert!(host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }
}
