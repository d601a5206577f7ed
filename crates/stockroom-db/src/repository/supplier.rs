//! # Supplier Repository

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::product::generate_id;
use crate::error::DbResult;
use stockroom_core::Supplier;

/// Repository for suppliers.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Inserts a supplier with a generated id.
    pub async fn create(&self, name: &str, contact_email: Option<&str>) -> DbResult<Supplier> {
        let supplier = Supplier {
            id: generate_id(),
            name: name.to_string(),
            contact_email: contact_email.map(str::to_string),
        };
        debug!(id = %supplier.id, name = %supplier.name, "Inserting supplier");

        sqlx::query(
            "INSERT INTO suppliers (id, name, contact_email, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.contact_email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Gets a supplier by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, contact_email FROM suppliers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }
}
