//! # Health Route

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct MigrationCounts {
    pub total: usize,
    pub applied: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    pub database: bool,
    pub migrations: MigrationCounts,
}

/// `GET /health`
///
/// 200 when the database answers and every migration is applied, 503 otherwise,
/// including when the migration table cannot be read.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.health_check().await;

    let (migrations_ok, total, applied) = match state.db.migration_status().await {
        Ok((total, applied)) => (total == applied, total, applied),
        Err(e) => {
            warn!(error = %e, "Could not read migration status");
            (false, 0, 0)
        }
    };

    let healthy = database && migrations_ok;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            database,
            migrations: MigrationCounts { total, applied },
        }),
    )
}
