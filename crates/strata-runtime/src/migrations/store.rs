use std::future::Future;
use std::pin::Pin;

use sqlx::{PgPool, Row};

use strata_core::error::{Result, StrataError};
use strata_core::migrate::{MigrationRecord, MigrationStore};

/// Durable migration log backed by PostgreSQL.
///
/// Rows are `(owner, migration_id, timestamp)`; a NULL `migration_id` marks
/// a module that was bootstrapped from its baseline.
pub struct LogStore {
    pool: PgPool,
}

impl LogStore {
    /// Create a log store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MigrationStore for LogStore {
    fn ensure_exists(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS strata_migrations (
                    owner TEXT NOT NULL,
                    migration_id TEXT,
                    timestamp TIMESTAMPTZ NOT NULL
                )
                "#,
            )
            .execute(&self.pool)
            .await
            .map_err(|e| {
                StrataError::Database(format!("Failed to create migration log table: {}", e))
            })?;
            Ok(())
        })
    }

    fn load_all(&self) -> Pin<Box<dyn Future<Output = Result<Vec<MigrationRecord>>> + Send + '_>> {
        Box::pin(async move {
            let rows = sqlx::query(
                r#"
                SELECT owner, migration_id, timestamp
                FROM strata_migrations
                ORDER BY timestamp ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StrataError::Database(format!("Failed to load migration log: {}", e)))?;

            let records = rows
                .iter()
                .map(|row| MigrationRecord {
                    owner: row.get("owner"),
                    migration_id: row.get("migration_id"),
                    timestamp: row.get("timestamp"),
                })
                .collect();

            Ok(records)
        })
    }

    fn append(
        &self,
        record: MigrationRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO strata_migrations (owner, migration_id, timestamp) VALUES ($1, $2, $3)",
            )
            .bind(&record.owner)
            .bind(&record.migration_id)
            .bind(record.timestamp)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                StrataError::Database(format!(
                    "Failed to record migration for '{}': {}",
                    record.owner, e
                ))
            })?;
            Ok(())
        })
    }

    fn remove(
        &self,
        owner: &str,
        migration_id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let owner = owner.to_string();
        let migration_id = migration_id.to_string();
        Box::pin(async move {
            sqlx::query("DELETE FROM strata_migrations WHERE owner = $1 AND migration_id = $2")
                .bind(&owner)
                .bind(&migration_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    StrataError::Database(format!(
                        "Failed to remove migration record '{}' for '{}': {}",
                        migration_id, owner, e
                    ))
                })?;
            Ok(())
        })
    }
}
