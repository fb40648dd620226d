//! Mock implementations of the reconciliation seams.
//!
//! Records executed statements and log operations for verification in tests,
//! with switches for injecting failures at precise points.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::{Result, StrataError};
use crate::migrate::{MigrationRecord, MigrationStore, StatementExecutor};

/// Mock statement executor for testing.
///
/// Records every statement it is asked to execute, in order. A statement can
/// be marked as failing with [`fail_on`](Self::fail_on); the attempt is
/// still recorded before the error is returned.
///
/// # Example
///
/// ```ignore
/// let executor = MockExecutor::new();
/// executor.fail_on("ALTER TABLE accounts ADD COLUMN plan TEXT");
///
/// // ... drive a migration run against it ...
///
/// executor.assert_executed("CREATE TABLE accounts (id BIGINT)");
/// ```
pub struct MockExecutor {
    executed: RwLock<Vec<String>>,
    failures: RwLock<Vec<String>>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        Self {
            executed: RwLock::new(Vec::new()),
            failures: RwLock::new(Vec::new()),
        }
    }

    /// Mark a statement as failing when executed.
    pub fn fail_on(&self, statement: impl Into<String>) {
        self.failures.write().unwrap().push(statement.into());
    }

    /// Every statement executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.read().unwrap().clone()
    }

    /// Assert that a statement was executed.
    pub fn assert_executed(&self, statement: &str) {
        let executed = self.executed.read().unwrap();
        let found = executed.iter().any(|s| s == statement);
        assert!(
            found,
            "Expected statement '{}' to be executed, but it wasn't. Executed: {:?}",
            statement, *executed
        );
    }

    /// Assert that a statement was not executed.
    pub fn assert_not_executed(&self, statement: &str) {
        let executed = self.executed.read().unwrap();
        let found = executed.iter().any(|s| s == statement);
        assert!(
            !found,
            "Expected statement '{}' NOT to be executed, but it was",
            statement
        );
    }

    /// Assert the total number of executed statements.
    pub fn assert_execution_count(&self, expected: usize) {
        let count = self.executed.read().unwrap().len();
        assert_eq!(
            count, expected,
            "Expected {} statement executions, but found {}",
            expected, count
        );
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementExecutor for MockExecutor {
    fn execute(&self, statement: &str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let statement = statement.to_string();
        Box::pin(async move {
            self.executed.write().unwrap().push(statement.clone());

            let should_fail = self.failures.read().unwrap().iter().any(|s| *s == statement);
            if should_fail {
                return Err(StrataError::Database(format!(
                    "injected failure for statement: {}",
                    statement
                )));
            }

            Ok(())
        })
    }
}

/// Mock migration log for testing.
///
/// Keeps records in memory, can be seeded with pre-existing entries, and
/// exposes switches to make any individual operation fail.
pub struct MockStore {
    records: RwLock<Vec<MigrationRecord>>,
    ensured: AtomicBool,
    fail_ensure: AtomicBool,
    fail_load: AtomicBool,
    fail_appends: RwLock<Vec<(String, Option<String>)>>,
    fail_removes: RwLock<Vec<(String, String)>>,
}

impl MockStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a mock store seeded with pre-existing log entries.
    pub fn with_records(records: Vec<MigrationRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ensured: AtomicBool::new(false),
            fail_ensure: AtomicBool::new(false),
            fail_load: AtomicBool::new(false),
            fail_appends: RwLock::new(Vec::new()),
            fail_removes: RwLock::new(Vec::new()),
        }
    }

    /// Make `ensure_exists` fail.
    pub fn fail_ensure(&self) {
        self.fail_ensure.store(true, Ordering::Relaxed);
    }

    /// Make `load_all` fail.
    pub fn fail_load(&self) {
        self.fail_load.store(true, Ordering::Relaxed);
    }

    /// Make `append` fail for a specific entry. Pass `None` to target the
    /// owner's bootstrap marker.
    pub fn fail_append_on(&self, owner: impl Into<String>, migration_id: Option<&str>) {
        self.fail_appends
            .write()
            .unwrap()
            .push((owner.into(), migration_id.map(String::from)));
    }

    /// Make `remove` fail for a specific entry.
    pub fn fail_remove_on(&self, owner: impl Into<String>, migration_id: impl Into<String>) {
        self.fail_removes
            .write()
            .unwrap()
            .push((owner.into(), migration_id.into()));
    }

    /// Whether `ensure_exists` completed.
    pub fn was_ensured(&self) -> bool {
        self.ensured.load(Ordering::Relaxed)
    }

    /// All log entries currently held.
    pub fn records(&self) -> Vec<MigrationRecord> {
        self.records.read().unwrap().clone()
    }

    /// Whether an applied-migration entry exists.
    pub fn contains(&self, owner: &str, migration_id: &str) -> bool {
        self.records
            .read()
            .unwrap()
            .iter()
            .any(|r| r.owner == owner && r.migration_id.as_deref() == Some(migration_id))
    }

    /// Whether a bootstrap marker exists for the owner.
    pub fn has_marker(&self, owner: &str) -> bool {
        self.records
            .read()
            .unwrap()
            .iter()
            .any(|r| r.owner == owner && r.is_marker())
    }

    /// Assert that an applied-migration entry exists.
    pub fn assert_recorded(&self, owner: &str, migration_id: &str) {
        assert!(
            self.contains(owner, migration_id),
            "Expected log entry for '{}' / '{}', but it wasn't there. Records: {:?}",
            owner,
            migration_id,
            self.records()
        );
    }

    /// Assert that no applied-migration entry exists.
    pub fn assert_not_recorded(&self, owner: &str, migration_id: &str) {
        assert!(
            !self.contains(owner, migration_id),
            "Expected NO log entry for '{}' / '{}', but it was there",
            owner,
            migration_id
        );
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationStore for MockStore {
    fn ensure_exists(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            if self.fail_ensure.load(Ordering::Relaxed) {
                return Err(StrataError::Database(
                    "injected failure for ensure_exists".to_string(),
                ));
            }
            self.ensured.store(true, Ordering::Relaxed);
            Ok(())
        })
    }

    fn load_all(&self) -> Pin<Box<dyn Future<Output = Result<Vec<MigrationRecord>>> + Send + '_>> {
        Box::pin(async move {
            if self.fail_load.load(Ordering::Relaxed) {
                return Err(StrataError::Database(
                    "injected failure for load_all".to_string(),
                ));
            }
            Ok(self.records.read().unwrap().clone())
        })
    }

    fn append(
        &self,
        record: MigrationRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let blocked = self
                .fail_appends
                .read()
                .unwrap()
                .iter()
                .any(|(owner, id)| *owner == record.owner && *id == record.migration_id);
            if blocked {
                return Err(StrataError::Database(format!(
                    "injected failure appending entry for {} / {:?}",
                    record.owner, record.migration_id
                )));
            }

            self.records.write().unwrap().push(record);
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
            let blocked = self
                .fail_removes
                .read()
                .unwrap()
                .iter()
                .any(|(o, id)| *o == owner && *id == migration_id);
            if blocked {
                return Err(StrataError::Database(format!(
                    "injected failure removing entry for {} / {}",
                    owner, migration_id
                )));
            }

            self.records
                .write()
                .unwrap()
                .retain(|r| !(r.owner == owner && r.migration_id.as_deref() == Some(migration_id.as_str())));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_executor_records_statements_in_order() {
        let executor = MockExecutor::new();

        executor.execute("CREATE TABLE a (id INT)").await.unwrap();
        executor.execute("CREATE TABLE b (id INT)").await.unwrap();

        assert_eq!(
            executor.executed(),
            ["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]
        );
        executor.assert_executed("CREATE TABLE a (id INT)");
        executor.assert_not_executed("DROP TABLE a");
    }

    #[tokio::test]
    async fn test_executor_failure_still_records_attempt() {
        let executor = MockExecutor::new();
        executor.fail_on("DROP TABLE a");

        let result = executor.execute("DROP TABLE a").await;

        assert!(result.is_err());
        executor.assert_executed("DROP TABLE a");
        executor.assert_execution_count(1);
    }

    #[tokio::test]
    async fn test_store_append_and_remove() {
        let store = MockStore::new();

        store.ensure_exists().await.unwrap();
        store
            .append(MigrationRecord::applied("accounts", "0001"))
            .await
            .unwrap();

        assert!(store.was_ensured());
        store.assert_recorded("accounts", "0001");

        store.remove("accounts", "0001").await.unwrap();
        store.assert_not_recorded("accounts", "0001");
    }

    #[tokio::test]
    async fn test_store_remove_of_missing_entry_is_ok() {
        let store = MockStore::new();
        store.remove("accounts", "0001").await.unwrap();
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_store_seeded_records_are_loaded() {
        let store = MockStore::with_records(vec![
            MigrationRecord::marker("accounts"),
            MigrationRecord::applied("accounts", "0001"),
        ]);

        let records = store.load_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(store.has_marker("accounts"));
        assert!(store.contains("accounts", "0001"));
    }

    #[tokio::test]
    async fn test_store_targeted_append_failure() {
        let store = MockStore::new();
        store.fail_append_on("accounts", Some("0002"));

        store
            .append(MigrationRecord::applied("accounts", "0001"))
            .await
            .unwrap();
        let result = store.append(MigrationRecord::applied("accounts", "0002")).await;

        assert!(result.is_err());
        store.assert_recorded("accounts", "0001");
        store.assert_not_recorded("accounts", "0002");
    }

    #[tokio::test]
    async fn test_store_marker_append_failure() {
        let store = MockStore::new();
        store.fail_append_on("accounts", None);

        let result = store.append(MigrationRecord::marker("accounts")).await;

        assert!(result.is_err());
        assert!(!store.has_marker("accounts"));
    }
}
