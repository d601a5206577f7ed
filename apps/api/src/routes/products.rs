//! # Product Routes
//!
//! ## Intake Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/products                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  raw body ──► serde_json::Value          (not JSON → 400)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NewProduct::from_json                   (missing / bad field → 400)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository::create_with_inventory                               │
//! │       │   duplicate SKU / unknown reference → 409, other → 500         │
//! │       ▼                                                                 │
//! │  201 {"message": "Product created", "product_id": "<uuid>"}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The body is taken as raw bytes so malformed JSON produces the same
//! `{"error": ...}` body as every other validation failure. Bodies over
//! [`MAX_BODY_BYTES`](crate::MAX_BODY_BYTES) are refused with 413.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::AppState;
use stockroom_core::{CoreError, NewProduct};

/// Body of a successful intake.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProductResponse {
    pub message: String,
    pub product_id: String,
}

/// Stock of the product in one warehouse.
#[derive(Debug, Serialize, Deserialize)]
pub struct StockEntry {
    pub warehouse_id: String,
    pub quantity: i64,
}

/// A product with its inventory.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub sku: String,
    /// Decimal string, e.g. `"10.99"`.
    pub price: String,
    pub product_type: Option<String>,
    pub supplier_id: Option<String>,
    pub inventory: Vec<StockEntry>,
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<CreateProductResponse>), ApiError> {
    let body = body?;
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejected unparseable product body");
        ApiError::bad_request("Request body must be valid JSON")
    })?;

    let new_product = NewProduct::from_json(&value)?;

    let product = state.db.products().create_with_inventory(&new_product).await?;

    info!(
        product_id = %product.id,
        sku = %product.sku,
        warehouses = new_product.inventory.len(),
        "Product intake complete"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            message: "Product created".to_string(),
            product_id: product.id,
        }),
    ))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(id.clone()))?;

    let inventory = state
        .db
        .inventory()
        .list_for_product(&product.id)
        .await?
        .into_iter()
        .map(|level| StockEntry {
            warehouse_id: level.warehouse_id,
            quantity: level.quantity,
        })
        .collect();

    Ok(Json(ProductDetail {
        price: product.price().to_decimal().to_string(),
        id: product.id,
        name: product.name,
        sku: product.sku,
        product_type: product.product_type,
        supplier_id: product.supplier_id,
        inventory,
    }))
}
