mod migration;
mod record;
mod registry;
mod traits;

pub use migration::{Catalog, Migration};
pub use record::MigrationRecord;
pub use registry::CatalogRegistry;
pub use traits::{MigrationStore, StatementExecutor};
