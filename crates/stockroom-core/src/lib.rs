//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate contains the rules behind product intake and stock monitoring
//! as pure functions with zero I/O dependencies.
//!
//! ## Where it sits
//! ```text
//!   apps/api        HTTP handlers, status codes, JSON bodies
//!      │
//!      ▼
//!   stockroom-core  request parsing, price arithmetic, alert rules   (no I/O)
//!      ▲
//!      │
//!   stockroom-db    SQLite pool, migrations, repositories
//! ```
//!
//! Both outer crates depend on this one; it depends on neither.

//! ## Modules
//!
//! - [`types`] - Domain types (Product, InventoryLevel, Warehouse, etc.)
//! - [`money`] - Money type with integer cents and exact decimal parsing
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//! - [`intake`] - Parsing and validation of "create product" requests
//! - [`low_stock`] - Low-stock alert computation
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::money::Money;
//!
//! // Prices arrive as decimal text and are held as integer cents
//! let price = Money::parse_decimal("10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//! assert_eq!(price.to_string(), "$10.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod intake;
pub mod low_stock;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use intake::{NewInventory, NewProduct};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Threshold used when no `product_thresholds` row matches a product type.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 20;

/// Number of trailing days of sales that count as "recent" activity.
///
/// Also the divisor for the average daily sales rate.
pub const SALES_WINDOW_DAYS: i64 = 30;

/// Maximum number of warehouse entries accepted in one intake request.
pub const MAX_WAREHOUSES_PER_PRODUCT: usize = 500;
