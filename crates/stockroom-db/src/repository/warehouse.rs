//! # Company & Warehouse Repository
//!
//! Companies and the warehouses they own. Product intake only references
//! warehouses by id; these rows are created by the seed binary and tests.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::product::generate_id;
use crate::error::DbResult;
use stockroom_core::{Company, Warehouse};

/// Repository for companies and warehouses.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    /// Creates a new WarehouseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WarehouseRepository { pool }
    }

    /// Inserts a company with a generated id.
    pub async fn create_company(&self, name: &str) -> DbResult<Company> {
        let company = Company {
            id: generate_id(),
            name: name.to_string(),
        };
        debug!(id = %company.id, name = %company.name, "Inserting company");

        sqlx::query("INSERT INTO companies (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&company.id)
            .bind(&company.name)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(company)
    }

    /// Inserts a warehouse owned by `company_id`.
    ///
    /// Fails with `DbError::ForeignKeyViolation` for an unknown company.
    pub async fn create_warehouse(&self, company_id: &str, name: &str) -> DbResult<Warehouse> {
        let warehouse = Warehouse {
            id: generate_id(),
            company_id: company_id.to_string(),
            name: name.to_string(),
        };
        debug!(id = %warehouse.id, company_id = %company_id, "Inserting warehouse");

        sqlx::query(
            "INSERT INTO warehouses (id, company_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&warehouse.id)
        .bind(&warehouse.company_id)
        .bind(&warehouse.name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(warehouse)
    }

    /// Lists a company's warehouses by name.
    pub async fn list_for_company(&self, company_id: &str) -> DbResult<Vec<Warehouse>> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT id, company_id, name FROM warehouses WHERE company_id = ?1 ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(warehouses)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_warehouses_listed_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.warehouses();
        let acme = repo.create_company("Acme").await.unwrap();
        let other = repo.create_company("Other").await.unwrap();

        repo.create_warehouse(&acme.id, "Zeta").await.unwrap();
        repo.create_warehouse(&acme.id, "Alpha").await.unwrap();
        repo.create_warehouse(&other.id, "Elsewhere").await.unwrap();

        let names: Vec<String> = repo
            .list_for_company(&acme.id)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn test_warehouse_requires_company() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .warehouses()
            .create_warehouse("no-such-company", "Main")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
