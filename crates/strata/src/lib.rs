//! STRATA - module-owned schema reconciliation for PostgreSQL.
//!
//! Each module of an application owns a [`Catalog`]: the ordered migrations
//! it has shipped plus the baseline statements that build its current schema
//! from scratch. At startup, [`Migrator`] reconciles every registered
//! catalog against a durable log: fresh databases are bootstrapped straight
//! from baselines, existing databases receive exactly the migrations they
//! are missing, and a mid-run failure rolls the whole run back.

mod migrator;

pub use strata_core::config::{DatabaseConfig, StrataConfig};
pub use strata_core::error::{Result, StrataError};
pub use strata_core::migrate::{
    Catalog, CatalogRegistry, Migration, MigrationRecord, MigrationStore, StatementExecutor,
};
pub use strata_runtime::db::Database;
pub use strata_runtime::migrations::{LogStore, MigrateError, Reconciler};

// Re-export the in-memory seams for consumers testing their own catalogs.
#[cfg(feature = "testing")]
pub use strata_core::testing::{MockExecutor, MockStore};

pub use migrator::Migrator;

/// Prelude module for common imports.
pub mod prelude {
    pub use strata_core::config::StrataConfig;
    pub use strata_core::error::{Result, StrataError};
    pub use strata_core::migrate::{Catalog, Migration};
    pub use strata_runtime::migrations::MigrateError;

    pub use crate::Migrator;
}
