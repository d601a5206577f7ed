//! # HTTP Routes
//!
//! ```text
//! POST /api/products                                 → products::create_product
//! GET  /api/products/{id}                            → products::get_product
//! GET  /api/companies/{company_id}/alerts/low-stock  → alerts::low_stock_alerts
//! GET  /health                                       → health::health_check
//! ```

pub mod alerts;
pub mod health;
pub mod products;

use crate::error::ApiError;

/// Fallback for unmatched paths, keeping the `{"error": ...}` body shape.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
