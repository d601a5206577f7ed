//! # Seed Data Generator
//!
//! Populates the database with a demo company for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./stockroom.db
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! ## Generated Data
//! - One company with three warehouses
//! - Two suppliers
//! - Thresholds for a few product types
//! - Products stocked across the warehouses, some of them running low
//! - A month of sales so the low-stock report has something to show
//!
//! Seeding is skipped when products already exist.

use std::env;

use anyhow::Context;
use chrono::{Duration, Utc};
use stockroom_core::{Money, NewInventory, NewProduct};
use stockroom_db::{Database, DbConfig};

const WAREHOUSES: &[&str] = &["Central", "Harbor", "Uptown"];

const THRESHOLDS: &[(&str, i64)] = &[("hardware", 50), ("electrical", 15), ("paint", 10)];

/// (sku, name, price, product_type, supplier index, stock per warehouse, units sold per day)
#[allow(clippy::type_complexity)]
const PRODUCTS: &[(&str, &str, &str, &str, usize, [i64; 3], i64)] = &[
    ("HW-BOLT-M8", "M8 Hex Bolt", "0.35", "hardware", 0, [400, 35, 120], 6),
    ("HW-NUT-M8", "M8 Hex Nut", "0.12", "hardware", 0, [20, 300, 80], 4),
    ("HW-HINGE-3", "3in Door Hinge", "4.99", "hardware", 0, [12, 60, 0], 1),
    ("EL-CABLE-25", "Cable 2.5mm 10m", "18.50", "electrical", 1, [8, 40, 14], 2),
    ("EL-SWITCH-1G", "Single Gang Switch", "3.20", "electrical", 1, [100, 3, 25], 3),
    ("PT-WHITE-5L", "White Emulsion 5L", "24.00", "paint", 1, [6, 9, 30], 1),
    ("PT-PRIMER-1L", "Wood Primer 1L", "9.75", "paint", 1, [40, 40, 40], 0),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./stockroom.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let company = db.warehouses().create_company("Demo Hardware Ltd").await?;
    let mut warehouse_ids = Vec::with_capacity(WAREHOUSES.len());
    for name in WAREHOUSES {
        warehouse_ids.push(db.warehouses().create_warehouse(&company.id, name).await?.id);
    }

    let suppliers = [
        db.suppliers()
            .create("Fastenal Wholesale", Some("orders@fastenal.example"))
            .await?,
        db.suppliers()
            .create("Brightline Trade", Some("trade@brightline.example"))
            .await?,
    ];

    for (product_type, value) in THRESHOLDS {
        db.low_stock().set_threshold(product_type, *value).await?;
    }

    println!("✓ Company {} ({})", company.name, company.id);

    let now = Utc::now();
    let mut sales = 0;

    for (sku, name, price, product_type, supplier_idx, stock, daily) in PRODUCTS {
        let new_product = NewProduct {
            name: name.to_string(),
            sku: sku.to_string(),
            price: Money::parse_decimal(price)?,
            initial_quantity: 0,
            product_type: Some(product_type.to_string()),
            supplier_id: Some(suppliers[*supplier_idx].id.clone()),
            inventory: warehouse_ids
                .iter()
                .zip(stock.iter())
                .map(|(warehouse_id, quantity)| NewInventory {
                    warehouse_id: warehouse_id.clone(),
                    quantity: *quantity,
                })
                .collect(),
        };

        let product = db
            .products()
            .create_with_inventory(&new_product)
            .await
            .with_context(|| format!("creating {sku}"))?;

        if *daily > 0 {
            for day in 1..=28 {
                let warehouse_id = &warehouse_ids[day as usize % warehouse_ids.len()];
                db.sales()
                    .record(&product.id, warehouse_id, *daily, now - Duration::days(day))
                    .await?;
                sales += 1;
            }
        }
    }

    println!("✓ Generated {} products and {} sales", PRODUCTS.len(), sales);

    let alerts = db.low_stock().alerts_for_company(&company.id).await?;
    println!("  Low-stock alerts: {}", alerts.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
