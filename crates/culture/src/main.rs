//! Culture bot binary.
//!
//! Loads `.env`, the configuration file and the environment, then runs the
//! Discord bot until SIGINT or SIGTERM.

use clap::Parser;
use culture::{CultureConfig, ObservabilityConfig, init_observability, run};
use std::path::PathBuf;
use tracing::{info, warn};

/// Culture - browse Gelbooru posts from Discord
#[derive(Parser, Debug)]
#[command(name = "culture")]
#[command(about = "Discord bot for browsing Gelbooru posts", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./culture.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Keep favorites in memory instead of the database
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();

    init_observability(
        &ObservabilityConfig::verbose(cli.verbose).with_json_logs(cli.json_logs),
    )?;

    if let Err(e) = dotenv
        && !e.not_found()
    {
        warn!(error = %e, "Failed to read .env file");
    }

    let config = CultureConfig::load(cli.config.as_deref())?;
    info!(
        dev_guild = ?config.discord().dev_guild_id(),
        ephemeral = cli.ephemeral,
        "Configuration loaded"
    );

    run(config, cli.ephemeral, shutdown_signal()).await
}

/// Completes on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
