//! Career guide CLI and RPC API entry point.
//!
//! Binary name: `cguide`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! appropriate command handler or starts the RPC API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use careerguide_infra::config::{load_app_config, resolve_config_path};
use careerguide_infra::filesystem::resolve_data_dir;
use careerguide_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::{Cli, Commands, TokenCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.json_logs, cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need config or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "cguide", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config_path = resolve_config_path(cli.config.as_deref(), &data_dir);
    let config = load_app_config(&config_path).await;

    match cli.command {
        Commands::Serve { port, host } => {
            let state = AppState::init(&config, data_dir).await?;
            let db_pool = state.db_pool.clone();

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, "RPC API listening");
            if !cli.quiet {
                println!(
                    "  {} Career guide API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            db_pool.close().await;
            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Migrate => {
            cli::migrate::run_migrations(&config, &data_dir, cli.json).await?;
        }

        Commands::Token { action } => match action {
            TokenCommand::Issue {
                subject,
                email,
                name,
                ttl_secs,
            } => {
                let claims = cli::token::build_claims(
                    subject,
                    email,
                    name,
                    ttl_secs,
                    chrono::Utc::now().timestamp(),
                );
                cli::token::issue_token(&config, &claims, cli.json)?;
            }
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
