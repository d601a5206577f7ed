//! # Storage Errors
//!
//! [`DbError`] is what every repository returns. SQLite failures are sorted
//! by kind here so the HTTP layer can pick a status without parsing strings.
//!
//! ```text
//!   sqlx::Error ──From──► DbError ──From──► ApiError ──► {"error": "..."}
//!                            │
//!        UniqueViolation ────┼──► 409 when it names products.sku
//!        ForeignKeyViolation ┼──► 400
//!        everything else ────┴──► 500, cause only in the logs
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// `field` is the `<table>.<column>` list SQLite reports, e.g.
    /// `products.sku` or `inventory.product_id, inventory.warehouse_id`.
    #[error("Duplicate {field}")]
    UniqueViolation { field: String },

    /// An inventory row named a missing warehouse, or a product a missing
    /// supplier. SQLite does not say which.
    #[error("Referenced row does not exist: {message}")]
    ForeignKeyViolation { message: String },

    #[error("Cannot connect: {0}")]
    ConnectionFailed(String),

    #[error("Migration error: {0}")]
    MigrationFailed(String),

    /// Any other error reported by SQLite itself.
    #[error("SQLite error: {0}")]
    QueryFailed(String),

    /// BEGIN or COMMIT did not go through.
    #[error("Transaction error: {0}")]
    TransactionFailed(String),

    /// No connection freed up within the acquire timeout.
    #[error("Timed out waiting for a database connection")]
    PoolExhausted,

    #[error("Database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True when the error is a UNIQUE violation on the given `<table>.<column>`.
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        match self {
            DbError::UniqueViolation { field } => field.split(", ").any(|f| f == column),
            _ => false,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let text = db_err.message();
                match db_err.kind() {
                    // SQLite: "UNIQUE constraint failed: products.sku"
                    ErrorKind::UniqueViolation => DbError::UniqueViolation {
                        field: text
                            .split("constraint failed: ")
                            .nth(1)
                            .unwrap_or("unknown")
                            .to_string(),
                    },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
                        message: text.to_string(),
                    },
                    _ => DbError::QueryFailed(text.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(source.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;
