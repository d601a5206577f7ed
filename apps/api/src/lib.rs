//! # Stockroom API
//!
//! HTTP server for product intake and stock reporting.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Stockroom API                                   │
//! │                                                                         │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌──────────────────┐  │
//! │  │  Products          │  │  Alerts            │  │  Health          │  │
//! │  │                    │  │                    │  │                  │  │
//! │  │ • POST /api/products│ │ • GET low-stock    │  │ • GET /health    │  │
//! │  │ • GET  …/{id}      │  │   per company      │  │                  │  │
//! │  └─────────┬──────────┘  └─────────┬──────────┘  └────────┬─────────┘  │
//! │            └───────────────────────┼──────────────────────┘            │
//! │                                    ▼                                    │
//! │                     AppState { db: Database }                           │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                          SQLite (stockroom-db)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `STOCKROOM_BIND_ADDR` - Interface to bind (default `0.0.0.0`)
//! - `STOCKROOM_PORT` - HTTP port (default `8080`)
//! - `STOCKROOM_DB_PATH` - SQLite file (default `./stockroom.db`)
//! - `STOCKROOM_DB_MAX_CONNECTIONS` - Pool size (default `5`)
//! - `RUST_LOG` - Log filter

pub mod config;
pub mod error;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use stockroom_db::Database;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};

/// Largest accepted request body. A full 500-warehouse intake fits well under it.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/products", post(routes::products::create_product))
        .route("/api/products/{id}", get(routes::products::get_product))
        .route(
            "/api/companies/{company_id}/alerts/low-stock",
            get(routes::alerts::low_stock_alerts),
        )
        .route("/health", get(routes::health::health_check))
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
