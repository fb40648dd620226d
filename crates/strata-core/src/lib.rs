pub mod config;
pub mod error;
pub mod migrate;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::StrataConfig;
pub use error::{Result, StrataError};
pub use migrate::{
    Catalog, CatalogRegistry, Migration, MigrationRecord, MigrationStore, StatementExecutor,
};
