use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use strata_core::config::DatabaseConfig;
use strata_core::error::{Result, StrataError};
use strata_core::migrate::StatementExecutor;

/// Database connection wrapper providing connection pooling.
///
/// Also serves as the [`StatementExecutor`] that the reconciliation engine
/// drives schema changes through.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection from configuration.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| StrataError::Database(format!("Failed to connect: {}", e)))?;

        Ok(Self { pool })
    }

    /// Connect to a database URL with default pool settings.
    pub async fn connect(url: &str) -> Result<Self> {
        let config = DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        };
        Self::from_config(&config).await
    }

    /// Wrap an existing connection pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StrataError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Close all connections gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl StatementExecutor for Database {
    fn execute(&self, statement: &str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let statement = statement.to_string();
        Box::pin(async move {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StrataError::Database(format!("Statement failed: {}", e)))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real PostgreSQL connection.
    // These tests cover construction without a database.

    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy("postgres://localhost/nonexistent")
            .expect("Failed to create mock pool")
    }

    #[tokio::test]
    async fn test_database_from_pool() {
        let db = Database::from_pool(lazy_pool());
        assert!(!db.pool().is_closed());
    }

    #[test]
    fn test_database_config_clone() {
        let config = DatabaseConfig {
            url: "postgres://localhost/test".to_string(),
            pool_size: 10,
            ..Default::default()
        };

        let cloned = config.clone();
        assert_eq!(cloned.url, config.url);
        assert_eq!(cloned.pool_size, config.pool_size);
    }
}
