//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the store
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::lifecycle::termination::ProcessExit;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::routing::InvalidVerb;
use crate::store::{SqliteStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to initialize database: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Routing(#[from] InvalidVerb),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the server until SIGINT/SIGTERM or an escalator termination.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let store = SqliteStore::open(&config.database).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(&config, Arc::new(store), Arc::new(ProcessExit))?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    announce(&config, local_addr);

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal(&signal_shutdown).await;
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}

fn announce(config: &ServerConfig, addr: SocketAddr) {
    let verb = &config.routing.escalator_verb;
    let health = &config.routing.health_check_path;

    tracing::info!(address = %addr, "Server running");
    tracing::info!("GET    /api/articles        get articles (777 instead of 200)");
    tracing::info!("POST   /api/article         create article (888/999 instead of 201/400)");
    tracing::info!("DELETE /api/article/{{id}}    delete article (666 instead of 404)");
    tracing::info!("POST   /api/user            create user (201/400, 500 on bad email)");
    tracing::info!("GET    /api/users           list users");
    tracing::info!("GET    {}    regular health check", health);
    tracing::info!("{}   {}    escalating health check", verb, health);
    tracing::info!("Try: curl -X {} http://{}{}", verb, addr, health);
}
