//! # Sale Repository
//!
//! Records sales and aggregates recent volume for the low-stock report.
//!
//! ## Sales Window
//! ```text
//!   now - SALES_WINDOW_DAYS                      now
//!   ────────┬──────────────────────────────────────┬────►
//!           │  counted: created_at > cutoff         │
//! ```
//! Timestamps are stored as RFC 3339 UTC text, so the cutoff comparison is a
//! plain string comparison.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::product::generate_id;
use crate::error::DbResult;
use stockroom_core::low_stock::SalesVolume;
use stockroom_core::{Sale, SALES_WINDOW_DAYS};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale at the given time.
    pub async fn record(
        &self,
        product_id: &str,
        warehouse_id: &str,
        quantity: i64,
        at: DateTime<Utc>,
    ) -> DbResult<Sale> {
        let sale = Sale {
            id: generate_id(),
            product_id: product_id.to_string(),
            warehouse_id: warehouse_id.to_string(),
            quantity,
            created_at: at,
        };

        debug!(id = %sale.id, product_id = %product_id, quantity, "Recording sale");

        sqlx::query(
            r#"
            INSERT INTO sales (id, product_id, warehouse_id, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(&sale.warehouse_id)
        .bind(sale.quantity)
        .bind(sale.created_at)
        .execute(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Sums sales inside the window ending at `now`, per product stocked by
    /// the company.
    ///
    /// Sales from any warehouse count toward a product's volume.
    pub async fn recent_volumes(
        &self,
        company_id: &str,
        now: DateTime<Utc>,
    ) -> DbResult<HashMap<String, SalesVolume>> {
        let cutoff = window_start(now);

        let rows: Vec<(String, i64, i64)> = sqlx::query_as(
            r#"
            SELECT s.product_id, COUNT(*), COALESCE(SUM(s.quantity), 0)
            FROM sales s
            WHERE s.created_at > ?1
              AND s.product_id IN (
                  SELECT i.product_id
                  FROM inventory i
                  INNER JOIN warehouses w ON w.id = i.warehouse_id
                  WHERE w.company_id = ?2
              )
            GROUP BY s.product_id
            "#,
        )
        .bind(cutoff)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(product_id, sale_count, units_sold)| {
                (
                    product_id,
                    SalesVolume {
                        sale_count,
                        units_sold,
                    },
                )
            })
            .collect())
    }
}

/// Start of the sales window, exclusive.
fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(SALES_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::{Money, NewInventory, NewProduct};

    async fn stocked_product(db: &Database, company_id: &str, sku: &str) -> (String, String) {
        let wh = db
            .warehouses()
            .create_warehouse(company_id, &format!("WH {sku}"))
            .await
            .unwrap();
        let product = db
            .products()
            .create_with_inventory(&NewProduct {
                name: sku.to_string(),
                sku: sku.to_string(),
                price: Money::from_cents(100),
                initial_quantity: 1,
                product_type: None,
                supplier_id: None,
                inventory: vec![NewInventory {
                    warehouse_id: wh.id.clone(),
                    quantity: 1,
                }],
            })
            .await
            .unwrap();
        (product.id, wh.id)
    }

    #[tokio::test]
    async fn test_recent_volumes_respect_window() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let company = db.warehouses().create_company("Acme").await.unwrap();
        let (product, wh) = stocked_product(&db, &company.id, "A").await;
        let now = Utc::now();

        db.sales().record(&product, &wh, 4, now - Duration::days(1)).await.unwrap();
        db.sales().record(&product, &wh, 6, now - Duration::days(29)).await.unwrap();
        db.sales().record(&product, &wh, 100, now - Duration::days(31)).await.unwrap();

        let volumes = db.sales().recent_volumes(&company.id, now).await.unwrap();
        assert_eq!(
            volumes.get(&product),
            Some(&SalesVolume {
                sale_count: 2,
                units_sold: 10
            })
        );
    }

    #[tokio::test]
    async fn test_recent_volumes_scoped_to_company() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let acme = db.warehouses().create_company("Acme").await.unwrap();
        let other = db.warehouses().create_company("Other").await.unwrap();
        let (mine, wh) = stocked_product(&db, &acme.id, "MINE").await;
        let (theirs, their_wh) = stocked_product(&db, &other.id, "THEIRS").await;
        let now = Utc::now();

        db.sales().record(&mine, &wh, 1, now).await.unwrap();
        db.sales().record(&theirs, &their_wh, 1, now).await.unwrap();

        let volumes = db.sales().recent_volumes(&acme.id, now).await.unwrap();
        assert!(volumes.contains_key(&mine));
        assert!(!volumes.contains_key(&theirs));
    }
}
