use thiserror::Error;

/// Core error type for STRATA operations.
#[derive(Error, Debug)]
pub enum StrataError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

/// Result type alias using StrataError.
pub type Result<T> = std::result::Result<T, StrataError>;
