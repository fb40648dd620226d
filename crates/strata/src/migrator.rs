//! Top-level coordinator tying the connection pool, the migration log and
//! the reconciliation engine together.

use std::sync::Arc;

use strata_core::config::StrataConfig;
use strata_core::error::StrataError;
use strata_core::migrate::Catalog;
use strata_runtime::db::Database;
use strata_runtime::migrations::{LogStore, MigrateError, Reconciler};

/// The main STRATA entry point.
///
/// ```ignore
/// let mut migrator = Migrator::connect("postgres://localhost/app").await?;
/// migrator.register("accounts", accounts::catalog());
/// migrator.register("billing", billing::catalog());
/// migrator.migrate().await?;
/// ```
pub struct Migrator {
    db: Database,
    reconciler: Reconciler,
}

impl Migrator {
    /// Connect to a database URL with default pool settings.
    pub async fn connect(url: &str) -> Result<Self, StrataError> {
        let db = Database::connect(url).await?;
        Ok(Self::new(db))
    }

    /// Connect using a loaded configuration.
    pub async fn from_config(config: &StrataConfig) -> Result<Self, StrataError> {
        let db = Database::from_config(&config.database).await?;
        Ok(Self::new(db))
    }

    /// Build a migrator over an existing database handle.
    pub fn new(db: Database) -> Self {
        let store = LogStore::new(db.pool().clone());
        let reconciler = Reconciler::new(Arc::new(db.clone()), Arc::new(store));
        Self { db, reconciler }
    }

    /// Register a module's catalog. Registration order is reconciliation
    /// order.
    pub fn register(&mut self, owner: impl Into<String>, catalog: Catalog) {
        self.reconciler.register(owner, catalog);
    }

    /// Registered owners in reconciliation order.
    pub fn owners(&self) -> Vec<&str> {
        self.reconciler.owners()
    }

    /// Reconcile every registered catalog against the migration log.
    ///
    /// See [`Reconciler::migrate`] for the exact semantics.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        self.reconciler.migrate().await
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), StrataError> {
        self.db.health_check().await
    }

    /// Close all connections gracefully.
    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::migrate::Migration;

    fn lazy_database() -> Database {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy("postgres://localhost/nonexistent")
            .expect("Failed to create mock pool");
        Database::from_pool(pool)
    }

    #[tokio::test]
    async fn test_migrator_creation() {
        let migrator = Migrator::new(lazy_database());
        assert!(migrator.owners().is_empty());
    }

    #[tokio::test]
    async fn test_register_keeps_order() {
        let mut migrator = Migrator::new(lazy_database());
        migrator.register(
            "accounts",
            Catalog::new().with_baseline("CREATE TABLE accounts (id BIGINT)"),
        );
        migrator.register(
            "billing",
            Catalog::new().with_migration(Migration::new(
                "0001_invoices",
                "CREATE TABLE invoices (id BIGINT)",
                "DROP TABLE invoices",
            )),
        );

        assert_eq!(migrator.owners(), vec!["accounts", "billing"]);
    }

    #[tokio::test]
    async fn test_register_replaces_duplicate_owner() {
        let mut migrator = Migrator::new(lazy_database());
        migrator.register("accounts", Catalog::new());
        migrator.register(
            "accounts",
            Catalog::new().with_baseline("CREATE TABLE accounts (id BIGINT)"),
        );

        assert_eq!(migrator.owners(), vec!["accounts"]);
    }
}
