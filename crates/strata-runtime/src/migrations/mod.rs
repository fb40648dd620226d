mod error;
mod reconciler;
mod store;

pub use error::MigrateError;
pub use reconciler::Reconciler;
pub use store::LogStore;
