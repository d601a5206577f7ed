//! # Stockroom API Server
//!
//! ```bash
//! STOCKROOM_PORT=8080 STOCKROOM_DB_PATH=./stockroom.db cargo run -p stockroom-api
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stockroom_api::{create_router, ApiConfig, AppState};
use stockroom_db::{Database, DbConfig};

const DEFAULT_LOG_FILTER: &str = "info,stockroom=debug,sqlx=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Stockroom API server...");

    let config = ApiConfig::load()?;
    info!(
        addr = %config.socket_addr(),
        db_path = %config.db_path,
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.db_path).max_connections(config.db_max_connections);
    let db = Database::new(db_config)
        .await
        .with_context(|| format!("opening database at {}", config.db_path))?;
    info!("Database ready");

    let app = create_router(AppState::new(db.clone()));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
