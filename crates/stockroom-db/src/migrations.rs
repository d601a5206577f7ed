//! # Schema Migrations
//!
//! Files in `migrations/sqlite/` are compiled into the binary and applied in
//! filename order. Applied files are checksummed by sqlx, so a shipped
//! migration is never edited; schema changes go in a new `NNN_*.sql` file.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
///
/// `sqlx::migrate!()` embeds every SQL file at compile time, so the binary
/// needs no migration files at runtime.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies whatever has not been applied yet. Safe to call on every start.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!(available = MIGRATOR.migrations.len(), "Applying migrations");

    MIGRATOR.run(pool).await?;

    info!("Schema up to date");
    Ok(())
}

/// `(known, applied)` counts reported by `/health`.
///
/// Before the first run the bookkeeping table does not exist and `applied`
/// is 0. Any other failure is returned.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;
    if tracked == 0 {
        return Ok((total, 0));
    }

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, usize::try_from(applied).unwrap_or(0)))
}
