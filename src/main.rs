//! Strange Errors Server
//!
//! A demonstration server for error-handling fallacies, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────────────┐
//!                     │                  STRANGE ERRORS SERVER                  │
//!                     │                                                         │
//!   Client Request    │  ┌──────────┐    ┌───────────┐    ┌──────────────┐      │
//!   ──────────────────┼─▶│ http     │───▶│ routing   │───▶│  handlers    │      │
//!                     │  │ server   │    │ Dispatcher│    │  CRUD (777…) │──────┼──▶ store
//!                     │  └──────────┘    └─────┬─────┘    └──────────────┘      │   (SQLite)
//!                     │                        │ GOAT /api/health-check         │      ▲
//!                     │                        ▼                                │      │
//!                     │                 ┌──────────────┐   n = 4: delete file   │      │
//!                     │                 │  escalator   │────────────────────────┼──────┘
//!                     │                 │ counter+table│                        │
//!                     │                 └──────┬───────┘                        │
//!                     │                        │ n ≥ 5: TerminationSchedule     │
//!                     │                        ▼                                │
//!                     │                 ┌──────────────┐                        │
//!                     │                 │  lifecycle   │── exit(1) after delay  │
//!                     │                 │ termination  │                        │
//!                     │                 └──────────────┘                        │
//!                     │                                                         │
//!                     │  Cross-cutting: config · observability (tracing, metrics)│
//!                     └────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use strange_errors_server::config::load_config;
use strange_errors_server::lifecycle::startup;
use strange_errors_server::observability::logging;

#[derive(Parser)]
#[command(name = "strange-errors-server")]
#[command(about = "HTTP server demonstrating wrong status codes and an escalating health check")]
struct Args {
    /// Optional TOML configuration file. PORT, DB_PATH and LOG_LEVEL override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Strange Errors Server");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path,
        escalator_verb = %config.routing.escalator_verb,
        counter = ?config.escalator.counter,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
