//! Reconciliation of module catalogs against the migration log.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use strata_core::migrate::{
    Catalog, CatalogRegistry, MigrationRecord, MigrationStore, StatementExecutor,
};

use super::error::MigrateError;

/// A migration applied during the current run, retained for rollback.
struct AppliedMigration {
    owner: String,
    id: String,
    down: String,
}

/// Reconciles every registered module catalog against the migration log.
///
/// Modules never seen in the log are bootstrapped from their baseline;
/// known modules receive exactly the migrations the log is missing. If
/// anything fails, every migration applied during the run is reverted in
/// reverse order, across module boundaries.
pub struct Reconciler {
    executor: Arc<dyn StatementExecutor>,
    store: Arc<dyn MigrationStore>,
    registry: CatalogRegistry,
}

impl Reconciler {
    /// Create an engine over the given executor and log store.
    pub fn new(executor: Arc<dyn StatementExecutor>, store: Arc<dyn MigrationStore>) -> Self {
        Self {
            executor,
            store,
            registry: CatalogRegistry::new(),
        }
    }

    /// Register a module's catalog. Registration order is reconciliation
    /// order.
    pub fn register(&mut self, owner: impl Into<String>, catalog: Catalog) {
        self.registry.register(owner, catalog);
    }

    /// Registered owners in reconciliation order.
    pub fn owners(&self) -> Vec<&str> {
        self.registry.owners()
    }

    /// Drive every registered catalog to its target schema.
    ///
    /// Running twice in a row is a no-op: the second run executes no
    /// statements. On failure the run's applied migrations are rolled back
    /// and the triggering error returned; see [`MigrateError`] for what each
    /// variant says about the state left behind.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        self.store
            .ensure_exists()
            .await
            .map_err(MigrateError::Bootstrap)?;

        let log = self.store.load_all().await.map_err(MigrateError::LoadLog)?;
        debug!("Migration log has {} entries", log.len());

        let mut seen: HashSet<&str> = HashSet::new();
        let mut logged: HashSet<(&str, &str)> = HashSet::new();
        for record in &log {
            seen.insert(record.owner.as_str());
            if let Some(id) = &record.migration_id {
                logged.insert((record.owner.as_str(), id.as_str()));
            }
        }

        let mut applied: Vec<AppliedMigration> = Vec::new();
        let mut failure = None;

        'modules: for (owner, catalog) in self.registry.iter() {
            if !seen.contains(owner) {
                if let Err(e) = self.bootstrap(owner, catalog).await {
                    failure = Some(e);
                    break 'modules;
                }
                continue;
            }

            for migration in catalog.migrations() {
                if logged.contains(&(owner, migration.id.as_str())) {
                    continue;
                }

                info!("Applying migration: {}/{}", owner, migration.id);

                if let Err(e) = self.executor.execute(&migration.up).await {
                    failure = Some(MigrateError::Apply {
                        owner: owner.to_string(),
                        id: migration.id.clone(),
                        source: e,
                    });
                    break 'modules;
                }

                applied.push(AppliedMigration {
                    owner: owner.to_string(),
                    id: migration.id.clone(),
                    down: migration.down.clone(),
                });

                let record = MigrationRecord::applied(owner, migration.id.as_str());
                if let Err(e) = self.store.append(record).await {
                    failure = Some(MigrateError::Record {
                        owner: owner.to_string(),
                        id: Some(migration.id.clone()),
                        source: e,
                    });
                    break 'modules;
                }
            }
        }

        match failure {
            Some(cause) => Err(self.roll_back(applied, cause).await),
            None => Ok(()),
        }
    }

    /// Bring a module never seen in the log straight to its target schema.
    async fn bootstrap(&self, owner: &str, catalog: &Catalog) -> Result<(), MigrateError> {
        info!(
            "Bootstrapping module from baseline: {} ({} statements)",
            owner,
            catalog.baseline().len()
        );

        for statement in catalog.baseline() {
            self.executor
                .execute(statement)
                .await
                .map_err(|e| MigrateError::Baseline {
                    owner: owner.to_string(),
                    source: e,
                })?;
        }

        self.store
            .append(MigrationRecord::marker(owner))
            .await
            .map_err(|e| MigrateError::Record {
                owner: owner.to_string(),
                id: None,
                source: e,
            })?;

        // The baseline already contains every migration's effect; backfill
        // the log so future runs skip them.
        for migration in catalog.migrations() {
            self.store
                .append(MigrationRecord::applied(owner, migration.id.as_str()))
                .await
                .map_err(|e| MigrateError::Record {
                    owner: owner.to_string(),
                    id: Some(migration.id.clone()),
                    source: e,
                })?;
        }

        Ok(())
    }

    /// Revert every migration applied during this run, newest first, and
    /// remove its log entry. Returns `cause` if every revert lands, or a
    /// [`MigrateError::Rollback`] wrapping both failures if one does not.
    async fn roll_back(&self, applied: Vec<AppliedMigration>, cause: MigrateError) -> MigrateError {
        if !applied.is_empty() {
            warn!(
                "Rolling back {} applied migrations after failure: {}",
                applied.len(),
                cause
            );
        }

        for migration in applied.iter().rev() {
            let revert = match self.executor.execute(&migration.down).await {
                Ok(()) => self.store.remove(&migration.owner, &migration.id).await,
                Err(e) => Err(e),
            };

            if let Err(e) = revert {
                return MigrateError::Rollback {
                    owner: migration.owner.clone(),
                    id: migration.id.clone(),
                    cause: Box::new(cause),
                    source: e,
                };
            }

            warn!("Rolled back migration: {}/{}", migration.owner, migration.id);
        }

        cause
    }
}
