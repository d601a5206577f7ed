//! # Connection Pool
//!
//! Opens the SQLite file, applies pragmas, runs migrations and hands out
//! repositories that share one [`SqlitePool`].
//!
//! ## Startup
//! ```text
//! ┌───────────────────────────────┐
//! │ DbConfig::new("stockroom.db") │   or DbConfig::in_memory() in tests
//! └───────────────┬───────────────┘
//!                 │ connect_options()
//!                 ▼
//! ┌───────────────────────────────┐   journal_mode = WAL
//! │ SqliteConnectOptions          │   synchronous  = NORMAL
//! │                               │   foreign_keys = ON
//! └───────────────┬───────────────┘
//!                 │ SqlitePoolOptions (pool_size, acquire_timeout)
//!                 ▼
//! ┌───────────────────────────────┐
//! │ Database { pool }             │ ──► migrations::run_migrations
//! └───────────────┬───────────────┘
//!                 │ clone() per request
//!                 ▼
//!   products() inventory() warehouses() suppliers() sales() low_stock()
//! ```
//!
//! WAL lets the low-stock report read while an intake transaction holds the
//! write lock.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::{
    alerts::LowStockRepository, inventory::InventoryRepository, product::ProductRepository,
    sale::SaleRepository, supplier::SupplierRepository, warehouse::WarehouseRepository,
};

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// How to open the database.
///
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/stockroom/stockroom.db").max_connections(8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, created when missing. `:memory:` for a private in-memory database.
    pub path: PathBuf,

    /// Upper bound on pooled connections. Default: 5
    pub pool_size: u32,

    /// How long a request waits for a free connection. Default: 30s
    pub acquire_timeout: Duration,

    /// Apply pending migrations while connecting. Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            path: path.into(),
            pool_size: 5,
            acquire_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// A fresh private database that lives as long as the pool.
    ///
    /// SQLite gives every `:memory:` connection its own database, so the pool
    /// is pinned to a single connection.
    pub fn in_memory() -> Self {
        DbConfig {
            path: PathBuf::from(IN_MEMORY_PATH),
            pool_size: 1,
            acquire_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.pool_size = max;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.path)
                .create_if_missing(true)
        };

        Ok(options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared handle to the pool. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and, unless disabled, migrates.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.path.display(), pool_size = config.pool_size, "Opening database");

        let options = config.connect_options()?;
        debug!(in_memory = config.is_in_memory(), "SQLite options ready");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(config.acquire_timeout);
        if config.is_in_memory() {
            // Recycling the only connection would drop the database with it.
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// `(total, applied)` migration counts.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    /// Raw pool access for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    pub fn warehouses(&self) -> WarehouseRepository {
        WarehouseRepository::new(self.pool.clone())
    }

    pub fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::new(self.pool.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    pub fn low_stock(&self) -> LowStockRepository {
        LowStockRepository::new(self.pool.clone())
    }

    /// `SELECT 1` round trip.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes every connection; later queries fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);

        let (total, applied) = db.migration_status().await.unwrap();
        assert!(total >= 1);
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let a = Database::new(DbConfig::in_memory()).await.unwrap();
        let b = Database::new(DbConfig::in_memory()).await.unwrap();

        a.warehouses().create_company("Acme").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(b.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[test]
    fn test_builder() {
        let config = DbConfig::new("/tmp/stockroom-test.db")
            .max_connections(10)
            .run_migrations(false);

        assert_eq!(config.pool_size, 10);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
        assert_eq!(DbConfig::in_memory().pool_size, 1);
    }
}
