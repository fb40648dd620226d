//! Testing utilities for STRATA consumers.
//!
//! Provides in-memory implementations of the two reconciliation seams,
//! [`StatementExecutor`](crate::migrate::StatementExecutor) and
//! [`MigrationStore`](crate::migrate::MigrationStore), so migration flows
//! can be exercised without a database. Both record every call and can be
//! told to fail at precise points.

pub mod mock_db;

pub use mock_db::{MockExecutor, MockStore};
