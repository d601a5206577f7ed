//! # Repositories
//!
//! One struct per table group, each holding its own clone of the pool. SQL
//! lives here and nowhere else.
//!
//! [`ProductRepository::create_with_inventory`](product::ProductRepository::create_with_inventory)
//! is the only write that must be all-or-nothing; its inserts share one
//! `sqlx::Transaction`.
//!
//! ## Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product intake and lookup
//! - [`InventoryRepository`](inventory::InventoryRepository) - Stock per warehouse
//! - [`WarehouseRepository`](warehouse::WarehouseRepository) - Companies and warehouses
//! - [`SupplierRepository`](supplier::SupplierRepository) - Suppliers
//! - [`SaleRepository`](sale::SaleRepository) - Sales and recent volume
//! - [`LowStockRepository`](alerts::LowStockRepository) - Low-stock report

pub mod alerts;
pub mod inventory;
pub mod product;
pub mod sale;
pub mod supplier;
pub mod warehouse;
