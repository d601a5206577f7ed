//! # Inventory Repository
//!
//! Read access to per-warehouse stock levels. Rows are only ever written by
//! [`ProductRepository::create_with_inventory`](super::product::ProductRepository::create_with_inventory).

use sqlx::SqlitePool;

use crate::error::DbResult;
use stockroom_core::InventoryLevel;

/// Repository for inventory rows.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Lists a product's stock per warehouse, ordered by warehouse id.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<InventoryLevel>> {
        let levels = sqlx::query_as::<_, InventoryLevel>(
            r#"
            SELECT id, product_id, warehouse_id, quantity, updated_at
            FROM inventory
            WHERE product_id = ?1
            ORDER BY warehouse_id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(levels)
    }
}
