//! # Low-Stock Alert Route

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;
use stockroom_core::LowStockAlert;

#[derive(Debug, Serialize, Deserialize)]
pub struct LowStockResponse {
    pub alerts: Vec<LowStockAlert>,
    pub total_alerts: usize,
}

/// `GET /api/companies/{company_id}/alerts/low-stock`
///
/// An unknown company is not an error; it just has nothing to report.
pub async fn low_stock_alerts(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<LowStockResponse>, ApiError> {
    let alerts = state.db.low_stock().alerts_for_company(&company_id).await?;

    debug!(company_id = %company_id, count = alerts.len(), "Low-stock report");

    Ok(Json(LowStockResponse {
        total_alerts: alerts.len(),
        alerts,
    }))
}
