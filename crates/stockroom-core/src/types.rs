//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ```text
//!   Company 1──* Warehouse 1──* InventoryLevel *──1 Product *──0..1 Supplier
//!                                                     │
//!                                                     └──* Sale
//! ```
//!
//! Ids are UUID v4 strings generated by the database layer. `sku` is the only
//! human-facing key and is unique across all products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product tracked across warehouses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier, unique across the store.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Category used to pick a low-stock threshold.
    pub product_type: Option<String>,

    /// Who restocks this product.
    pub supplier_id: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Stock of one product in one warehouse.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryLevel {
    pub id: String,
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Company / Warehouse / Supplier
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Company {
    pub id: String,
    pub name: String,
}

/// A physical stock location owned by a company.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Warehouse {
    pub id: String,
    pub company_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_email: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale of some quantity of a product out of a warehouse.
///
/// Only the low-stock report reads these; they are written by the seed
/// binary and by tests.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Low-Stock Alert
// =============================================================================

/// Supplier details embedded in an alert so the buyer can reorder directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierContact {
    pub id: String,
    pub name: String,
    pub contact_email: Option<String>,
}

/// One product in one warehouse that is selling and below its threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LowStockAlert {
    pub product_id: String,
    pub product_name: String,
    pub sku: String,
    pub warehouse_id: String,
    pub warehouse_name: String,
    pub current_stock: i64,
    pub threshold: i64,
    /// `None` when the sales window has no positive volume.
    pub days_until_stockout: Option<i64>,
    pub supplier: Option<SupplierContact>,
}

// =============================================================================
// Unit Tests
// =============================================================================
