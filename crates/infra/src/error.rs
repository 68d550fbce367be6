use thiserror::Error;

/// Uniform error type for every store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store is not connected")]
    NotConnected,

    #[error("record not found")]
    NotFound,

    #[error("store operation failed: {0}")]
    Operation(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => StoreError::NotConnected,
            other => StoreError::Operation(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Operation(e.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
