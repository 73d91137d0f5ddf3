pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repository;
pub mod seed;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure raised by a store implementation. The API layer reports these
/// generically and logs the full chain.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Conflict(String),

    #[error("corrupt row: {0}")]
    Decode(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
