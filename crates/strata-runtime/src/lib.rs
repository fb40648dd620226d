pub mod db;
pub mod migrations;

pub use db::Database;
pub use migrations::{LogStore, MigrateError, Reconciler};
