use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::migrate::MigrationRecord;

/// Trait for executing schema statements against the target database.
///
/// This is the reconciliation engine's only channel for changing schema
/// state, keeping the engine independent of any concrete driver.
pub trait StatementExecutor: Send + Sync {
    /// Execute a single SQL statement.
    fn execute(&self, statement: &str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Trait for the durable migration log.
///
/// Implementations persist which migrations have been applied for which
/// module, surviving process restarts.
pub trait MigrationStore: Send + Sync {
    /// Create the log's own storage if it does not exist yet. Must be
    /// idempotent.
    fn ensure_exists(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Load every log entry.
    fn load_all(&self) -> Pin<Box<dyn Future<Output = Result<Vec<MigrationRecord>>> + Send + '_>>;

    /// Append one entry to the log.
    fn append(
        &self,
        record: MigrationRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Remove the entry for a specific applied migration. Removing an entry
    /// that does not exist is not an error.
    fn remove(
        &self,
        owner: &str,
        migration_id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
