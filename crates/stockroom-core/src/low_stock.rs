//! # Low-Stock Alerts
//!
//! Decides which stock rows of a company need reordering.
//!
//! ## Rule
//! ```text
//! for each inventory row in the company's warehouses:
//!     sold  = units of the product sold in the last SALES_WINDOW_DAYS (any warehouse)
//!     sold == no sales at all            → skip (dormant product)
//!     threshold = per product_type, else DEFAULT_LOW_STOCK_THRESHOLD
//!     quantity >= threshold              → skip
//!     days_until_stockout = floor(quantity / (sold / SALES_WINDOW_DAYS))
//! ```
//!
//! The database layer gathers a [`StockSnapshot`]; everything here is pure.

use std::collections::HashMap;

use crate::types::{LowStockAlert, SupplierContact};
use crate::{DEFAULT_LOW_STOCK_THRESHOLD, SALES_WINDOW_DAYS};

/// One inventory row joined with the product, warehouse and supplier data an
/// alert needs.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockRow {
    pub product_id: String,
    pub product_name: String,
    pub sku: String,
    pub product_type: Option<String>,
    pub warehouse_id: String,
    pub warehouse_name: String,
    pub quantity: i64,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_email: Option<String>,
}

/// Units sold per product inside the sales window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesVolume {
    /// Number of sale records.
    pub sale_count: i64,
    /// Sum of their quantities.
    pub units_sold: i64,
}

/// Everything needed to evaluate one company.
#[derive(Debug, Clone, Default)]
pub struct StockSnapshot {
    pub rows: Vec<StockRow>,
    /// Keyed by product id. Products without recent sales are absent.
    pub recent_sales: HashMap<String, SalesVolume>,
    /// Keyed by product type.
    pub thresholds: HashMap<String, i64>,
}

impl StockSnapshot {
    fn threshold_for(&self, product_type: Option<&str>) -> i64 {
        product_type
            .and_then(|t| self.thresholds.get(t).copied())
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

/// Computes the alerts for a snapshot, preserving row order.
pub fn compute_alerts(snapshot: &StockSnapshot) -> Vec<LowStockAlert> {
    snapshot
        .rows
        .iter()
        .filter_map(|row| {
            let sales = snapshot.recent_sales.get(&row.product_id)?;
            if sales.sale_count == 0 {
                return None;
            }

            let threshold = snapshot.threshold_for(row.product_type.as_deref());
            if row.quantity >= threshold {
                return None;
            }

            Some(LowStockAlert {
                product_id: row.product_id.clone(),
                product_name: row.product_name.clone(),
                sku: row.sku.clone(),
                warehouse_id: row.warehouse_id.clone(),
                warehouse_name: row.warehouse_name.clone(),
                current_stock: row.quantity,
                threshold,
                days_until_stockout: days_until_stockout(row.quantity, sales.units_sold),
                supplier: supplier_contact(row),
            })
        })
        .collect()
}

/// `floor(quantity / (units_sold / SALES_WINDOW_DAYS))` in integer math.
///
/// Returns `None` when nothing was actually sold, since the rate is zero.
pub fn days_until_stockout(quantity: i64, units_sold: i64) -> Option<i64> {
    if units_sold <= 0 {
        return None;
    }
    let numerator = i128::from(quantity) * i128::from(SALES_WINDOW_DAYS);
    let days = numerator.div_euclid(i128::from(units_sold));
    i64::try_from(days).ok()
}

fn supplier_contact(row: &StockRow) -> Option<SupplierContact> {
    let id = row.supplier_id.clone()?;
    Some(SupplierContact {
        id,
        name: row.supplier_name.clone().unwrap_or_default(),
        contact_email: row.supplier_email.clone(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product_id: &str, quantity: i64, product_type: Option<&str>) -> StockRow {
        StockRow {
            product_id: product_id.to_string(),
            product_name: format!("Product {product_id}"),
            sku: format!("SKU-{product_id}"),
            product_type: product_type.map(str::to_string),
            warehouse_id: "wh-1".to_string(),
            warehouse_name: "Main".to_string(),
            quantity,
            supplier_id: Some("sup-1".to_string()),
            supplier_name: Some("Acme Supply".to_string()),
            supplier_email: Some("orders@acme.test".to_string()),
        }
    }

    fn sold(units: i64) -> SalesVolume {
        SalesVolume {
            sale_count: 1,
            units_sold: units,
        }
    }

    #[test]
    fn test_dormant_products_are_skipped() {
        let snapshot = StockSnapshot {
            rows: vec![row("a", 1, None)],
            ..Default::default()
        };
        assert!(compute_alerts(&snapshot).is_empty());
    }

    #[test]
    fn test_default_threshold_applies() {
        let mut snapshot = StockSnapshot {
            rows: vec![row("a", 19, None), row("b", 20, None)],
            ..Default::default()
        };
        snapshot.recent_sales.insert("a".to_string(), sold(30));
        snapshot.recent_sales.insert("b".to_string(), sold(30));

        let alerts = compute_alerts(&snapshot);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].product_id, "a");
        assert_eq!(alerts[0].threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    }

    #[test]
    fn test_type_threshold_overrides_default() {
        let mut snapshot = StockSnapshot {
            rows: vec![row("a", 40, Some("bulk")), row("b", 40, Some("other"))],
            ..Default::default()
        };
        snapshot.thresholds.insert("bulk".to_string(), 50);
        snapshot.recent_sales.insert("a".to_string(), sold(10));
        snapshot.recent_sales.insert("b".to_string(), sold(10));

        let alerts = compute_alerts(&snapshot);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].threshold, 50);
        assert_eq!(alerts[0].days_until_stockout, Some(120));
    }

    #[test]
    fn test_days_until_stockout_floors() {
        // 5 units at 7/30 per day = 21.43 days
        assert_eq!(days_until_stockout(5, 7), Some(21));
        assert_eq!(days_until_stockout(0, 7), Some(0));
        assert_eq!(days_until_stockout(10, 0), None);
    }

    #[test]
    fn test_zero_volume_sales_still_alert_without_estimate() {
        let mut snapshot = StockSnapshot {
            rows: vec![row("a", 2, None)],
            ..Default::default()
        };
        snapshot.recent_sales.insert(
            "a".to_string(),
            SalesVolume {
                sale_count: 2,
                units_sold: 0,
            },
        );
        let alerts = compute_alerts(&snapshot);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days_until_stockout, None);
    }

    #[test]
    fn test_missing_supplier_yields_none() {
        let mut r = row("a", 1, None);
        r.supplier_id = None;
        r.supplier_name = None;
        r.supplier_email = None;
        let mut snapshot = StockSnapshot {
            rows: vec![r],
            ..Default::default()
        };
        snapshot.recent_sales.insert("a".to_string(), sold(3));

        let alerts = compute_alerts(&snapshot);
        assert_eq!(alerts[0].supplier, None);
    }

    #[test]
    fn test_supplier_contact_is_embedded() {
        let mut snapshot = StockSnapshot {
            rows: vec![row("a", 1, None)],
            ..Default::default()
        };
        snapshot.recent_sales.insert("a".to_string(), sold(3));

        let supplier = compute_alerts(&snapshot)[0].supplier.clone().unwrap();
        assert_eq!(supplier.name, "Acme Supply");
        assert_eq!(supplier.contact_email.as_deref(), Some("orders@acme.test"));
    }
}
