//! # Low-Stock Report Repository
//!
//! Gathers a [`StockSnapshot`] for one company and hands it to
//! [`stockroom_core::low_stock::compute_alerts`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  inventory ⋈ warehouses ⋈ products ⟕ suppliers   ──► rows              │
//! │  sales (last SALES_WINDOW_DAYS, grouped)          ──► recent_sales      │
//! │  product_thresholds                               ──► thresholds        │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                        compute_alerts(snapshot)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::sale::SaleRepository;
use crate::error::DbResult;
use stockroom_core::low_stock::{compute_alerts, StockRow, StockSnapshot};
use stockroom_core::LowStockAlert;

/// Repository backing the low-stock report.
#[derive(Debug, Clone)]
pub struct LowStockRepository {
    pool: SqlitePool,
}

impl LowStockRepository {
    /// Creates a new LowStockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LowStockRepository { pool }
    }

    /// Sets (or replaces) the threshold for a product type.
    pub async fn set_threshold(&self, product_type: &str, value: i64) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO product_thresholds (product_type, value) VALUES (?1, ?2)
            ON CONFLICT(product_type) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(product_type)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Loads everything needed to evaluate `company_id` as of `now`.
    ///
    /// Rows are ordered by warehouse name, then product name.
    pub async fn snapshot(&self, company_id: &str, now: DateTime<Utc>) -> DbResult<StockSnapshot> {
        let rows = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT
                p.id            AS product_id,
                p.name          AS product_name,
                p.sku           AS sku,
                p.product_type  AS product_type,
                w.id            AS warehouse_id,
                w.name          AS warehouse_name,
                i.quantity      AS quantity,
                s.id            AS supplier_id,
                s.name          AS supplier_name,
                s.contact_email AS supplier_email
            FROM inventory i
            INNER JOIN warehouses w ON w.id = i.warehouse_id
            INNER JOIN products p ON p.id = i.product_id
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            WHERE w.company_id = ?1
            ORDER BY w.name, p.name, w.id, p.id
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        let recent_sales = SaleRepository::new(self.pool.clone())
            .recent_volumes(company_id, now)
            .await?;

        let thresholds: HashMap<String, i64> =
            sqlx::query_as::<_, (String, i64)>("SELECT product_type, value FROM product_thresholds")
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .collect();

        debug!(
            company_id = %company_id,
            rows = rows.len(),
            selling = recent_sales.len(),
            "Loaded stock snapshot"
        );

        Ok(StockSnapshot {
            rows,
            recent_sales,
            thresholds,
        })
    }

    /// Low-stock alerts for a company as of now.
    ///
    /// An unknown company simply has no rows, so the result is empty.
    pub async fn alerts_for_company(&self, company_id: &str) -> DbResult<Vec<LowStockAlert>> {
        let snapshot = self.snapshot(company_id, Utc::now()).await?;
        Ok(compute_alerts(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::pool::{Database, DbConfig};
    use stockroom_core::{Money, NewInventory, NewProduct};

    async fn add_product(
        db: &Database,
        sku: &str,
        name: &str,
        product_type: Option<&str>,
        supplier_id: Option<&str>,
        stock: &[(&str, i64)],
    ) -> String {
        db.products()
            .create_with_inventory(&NewProduct {
                name: name.to_string(),
                sku: sku.to_string(),
                price: Money::from_cents(250),
                initial_quantity: 0,
                product_type: product_type.map(str::to_string),
                supplier_id: supplier_id.map(str::to_string),
                inventory: stock
                    .iter()
                    .map(|(wh, qty)| NewInventory {
                        warehouse_id: wh.to_string(),
                        quantity: *qty,
                    })
                    .collect(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_alerts_end_to_end() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let company = db.warehouses().create_company("Acme").await.unwrap();
        let north = db.warehouses().create_warehouse(&company.id, "North").await.unwrap();
        let east = db.warehouses().create_warehouse(&company.id, "East").await.unwrap();
        let supplier = db
            .suppliers()
            .create("Bolt Co", Some("sales@bolt.test"))
            .await
            .unwrap();
        db.low_stock().set_threshold("bulk", 100).await.unwrap();

        let bolts = add_product(
            &db,
            "BOLT",
            "Bolts",
            Some("bulk"),
            Some(&supplier.id),
            &[(&north.id, 60), (&east.id, 150)],
        )
        .await;
        let nuts = add_product(&db, "NUT", "Nuts", None, None, &[(&north.id, 5)]).await;
        // Low but never sold
        add_product(&db, "IDLE", "Idle", None, None, &[(&north.id, 1)]).await;

        let now = chrono::Utc::now();
        db.sales().record(&bolts, &east.id, 30, now - Duration::days(2)).await.unwrap();
        db.sales().record(&nuts, &north.id, 3, now - Duration::days(3)).await.unwrap();

        let alerts = db.low_stock().alerts_for_company(&company.id).await.unwrap();

        // East sits above the bulk threshold; North is ordered Bolts before Nuts.
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].sku, "BOLT");
        assert_eq!(alerts[0].warehouse_name, "North");
        assert_eq!(alerts[0].threshold, 100);
        assert_eq!(alerts[0].days_until_stockout, Some(60));
        assert_eq!(
            alerts[0].supplier.as_ref().map(|s| s.name.as_str()),
            Some("Bolt Co")
        );

        assert_eq!(alerts[1].sku, "NUT");
        assert_eq!(alerts[1].threshold, stockroom_core::DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(alerts[1].days_until_stockout, Some(50));
        assert!(alerts[1].supplier.is_none());
    }

    #[tokio::test]
    async fn test_unknown_company_has_no_alerts() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let alerts = db.low_stock().alerts_for_company("nobody").await.unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_set_threshold_replaces_value() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.low_stock().set_threshold("bulk", 10).await.unwrap();
        db.low_stock().set_threshold("bulk", 75).await.unwrap();

        let snapshot = db.low_stock().snapshot("nobody", chrono::Utc::now()).await.unwrap();
        assert_eq!(snapshot.thresholds.get("bulk"), Some(&75));
    }
}
