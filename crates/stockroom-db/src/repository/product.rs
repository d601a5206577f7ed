//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Atomic product intake (product row + one inventory row per warehouse)
//! - Lookups by id and SKU
//!
//! ## Intake Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_with_inventory                                │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO products  ──► UNIQUE(sku) may fail ────────┐            │
//! │    INSERT INTO inventory (warehouse 1)                     │            │
//! │    INSERT INTO inventory (warehouse 2) ──► FK may fail ───┤            │
//! │    ...                                                     │            │
//! │  COMMIT ◄── all inserts succeeded                          │            │
//! │                                                            ▼            │
//! │                                    ROLLBACK, nothing persisted          │
//! │                                                                         │
//! │  Readers never observe a product without its inventory rows.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stockroom_core::{NewProduct, Product};

const PRODUCT_COLUMNS: &str =
    "id, sku, name, price_cents, product_type, supplier_id, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Intake a product with its starting stock
/// let product = repo.create_with_inventory(&new_product).await?;
///
/// // Get by ID
/// let product = repo.get_by_id(&product.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a product together with its initial inventory rows.
    ///
    /// Either every row is written or none is.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product committed along with `inventory.len()` rows
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown warehouse or supplier
    pub async fn create_with_inventory(&self, new_product: &NewProduct) -> DbResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: generate_id(),
            sku: new_product.sku.clone(),
            name: new_product.name.clone(),
            price_cents: new_product.price.cents(),
            product_type: new_product.product_type.clone(),
            supplier_id: new_product.supplier_id.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(
            sku = %product.sku,
            warehouses = new_product.inventory.len(),
            "Creating product with inventory"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        match insert_in_tx(&mut tx, &product, new_product).await {
            Ok(()) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                info!(id = %product.id, sku = %product.sku, "Product created");
                Ok(product)
            }
            Err(err) => {
                warn!(sku = %product.sku, error = %err, "Product intake rolled back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Writes the product and its inventory rows on the open transaction.
///
/// Every statement must go through `tx`; touching the pool here would need a
/// second connection.
async fn insert_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    product: &Product,
    new_product: &NewProduct,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO products (
            id, sku, name, price_cents, product_type, supplier_id,
            created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&product.id)
    .bind(&product.sku)
    .bind(&product.name)
    .bind(product.price_cents)
    .bind(&product.product_type)
    .bind(&product.supplier_id)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(&mut **tx)
    .await?;

    for entry in &new_product.inventory {
        sqlx::query(
            r#"
            INSERT INTO inventory (
                id, product_id, warehouse_id, quantity, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(generate_id())
        .bind(&product.id)
        .bind(&entry.warehouse_id)
        .bind(entry.quantity)
        .bind(product.created_at)
        .bind(product.created_at)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Generates a new row ID (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::{Money, NewInventory};

    struct Fixture {
        db: Database,
        north: String,
        south: String,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let company = db.warehouses().create_company("Acme").await.unwrap();
        let north = db
            .warehouses()
            .create_warehouse(&company.id, "North")
            .await
            .unwrap();
        let south = db
            .warehouses()
            .create_warehouse(&company.id, "South")
            .await
            .unwrap();
        Fixture {
            db,
            north: north.id,
            south: south.id,
        }
    }

    fn new_product(sku: &str, warehouses: &[(&str, i64)]) -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            sku: sku.to_string(),
            price: Money::from_cents(1099),
            initial_quantity: 0,
            product_type: None,
            supplier_id: None,
            inventory: warehouses
                .iter()
                .map(|(id, qty)| NewInventory {
                    warehouse_id: id.to_string(),
                    quantity: *qty,
                })
                .collect(),
        }
    }

    async fn inventory_rows(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_persists_product_and_every_inventory_row() {
        let f = fixture().await;
        let input = new_product("WID-001", &[(&f.north, 5), (&f.south, 7)]);

        let product = f.db.products().create_with_inventory(&input).await.unwrap();

        assert_eq!(product.price_cents, 1099);
        assert_eq!(f.db.products().count().await.unwrap(), 1);
        assert_eq!(inventory_rows(&f.db).await, 2);

        let stored = f.db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.sku, "WID-001");
        assert_eq!(stored.price(), Money::from_cents(1099));
    }

    #[tokio::test]
    async fn test_create_without_warehouses_writes_only_product() {
        let f = fixture().await;
        f.db.products()
            .create_with_inventory(&new_product("WID-002", &[]))
            .await
            .unwrap();

        assert_eq!(f.db.products().count().await.unwrap(), 1);
        assert_eq!(inventory_rows(&f.db).await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_sku_is_unique_violation_and_writes_nothing() {
        let f = fixture().await;
        let repo = f.db.products();
        repo.create_with_inventory(&new_product("WID-001", &[(&f.north, 5)]))
            .await
            .unwrap();

        let err = repo
            .create_with_inventory(&new_product("WID-001", &[(&f.south, 9)]))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation_on("products.sku"), "got {err:?}");
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(inventory_rows(&f.db).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_warehouse_rolls_back_product() {
        let f = fixture().await;
        let input = new_product("WID-003", &[(&f.north, 5), ("missing-warehouse", 1)]);

        let err = f
            .db
            .products()
            .create_with_inventory(&input)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "got {err:?}");
        assert_eq!(f.db.products().count().await.unwrap(), 0);
        assert_eq!(inventory_rows(&f.db).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_supplier_is_foreign_key_violation() {
        let f = fixture().await;
        let mut input = new_product("WID-004", &[(&f.north, 1)]);
        input.supplier_id = Some("missing-supplier".to_string());

        let err = f
            .db
            .products()
            .create_with_inventory(&input)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "got {err:?}");
        assert_eq!(f.db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_pool_usable_after_rollback() {
        let f = fixture().await;
        let repo = f.db.products();
        let _ = repo
            .create_with_inventory(&new_product("WID-005", &[("nope", 1)]))
            .await;

        repo.create_with_inventory(&new_product("WID-005", &[(&f.north, 1)]))
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let f = fixture().await;
        assert!(f.db.products().get_by_id("nope").await.unwrap().is_none());
    }
}
