use thiserror::Error;

use strata_core::error::StrataError;

/// Error type for a reconciliation run.
///
/// Every variant except [`Rollback`](MigrateError::Rollback) means the
/// database was left consistent: either untouched, or restored by rolling
/// this run's migrations back. `Rollback` means a revert itself failed and
/// the database holds a partially rolled back state that needs operator
/// attention.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The migration log's own storage could not be created.
    #[error("Failed to prepare migration log: {0}")]
    Bootstrap(#[source] StrataError),

    /// The migration log could not be read.
    #[error("Failed to load migration log: {0}")]
    LoadLog(#[source] StrataError),

    /// A baseline statement failed while bootstrapping a module.
    #[error("Baseline for module '{owner}' failed: {source}")]
    Baseline {
        owner: String,
        #[source]
        source: StrataError,
    },

    /// A migration's up statement failed.
    #[error("Migration '{id}' for module '{owner}' failed: {source}")]
    Apply {
        owner: String,
        id: String,
        #[source]
        source: StrataError,
    },

    /// A log write failed after the schema change succeeded. `id` is `None`
    /// when the entry was a bootstrap marker.
    #[error("Failed to record migration {id:?} for module '{owner}': {source}")]
    Record {
        owner: String,
        id: Option<String>,
        #[source]
        source: StrataError,
    },

    /// A revert failed while rolling back, leaving migrations applied after
    /// this one reverted and this one plus everything before it in place.
    /// Carries the failure that triggered the rollback as `cause`.
    #[error("Rollback of migration '{id}' for module '{owner}' failed: {source} (while recovering from: {cause})")]
    Rollback {
        owner: String,
        id: String,
        cause: Box<MigrateError>,
        #[source]
        source: StrataError,
    },
}
