//! # stockroom-db: Database Layer for Stockroom
//!
//! SQLite storage for products, per-warehouse inventory, and the data behind
//! the low-stock report. Uses sqlx for async access.
//!
//! ```text
//!   Database ── pool.rs ──────────── SqlitePool (WAL, foreign_keys = ON)
//!      │                                  ▲
//!      ├── products()   ─┐                │
//!      ├── inventory()   │  repository/   │ clone of the pool each
//!      ├── warehouses()  ├────────────────┘
//!      ├── suppliers()   │
//!      ├── sales()       │
//!      └── low_stock()  ─┘
//!
//!   migrations.rs embeds migrations/sqlite/*.sql and applies them on connect
//! ```
//!
//! Every fallible call returns [`DbResult`]; sqlx errors are classified into
//! [`DbError`] so callers can tell a duplicate SKU from a dead connection.

//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{Database, DbConfig};
//!
//! // Migrations run on connect
//! let db = Database::new(DbConfig::new("stockroom.db")).await?;
//!
//! let product = db.products().create_with_inventory(&new_product).await?;
//! let alerts = db.low_stock().alerts_for_company(&company_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::alerts::LowStockRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::supplier::SupplierRepository;
pub use repository::warehouse::WarehouseRepository;
