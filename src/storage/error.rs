//! Errors raised while opening or bootstrapping storage.

use diesel::r2d2::PoolError;
use thiserror::Error;

/// Errors returned while preparing the database for use.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),

    /// A schema statement failed.
    #[error("failed to apply schema: {0}")]
    Migration(#[from] diesel::result::Error),

    /// The configuration describes an unusable database.
    #[error("invalid database configuration: {0}")]
    InvalidConfig(String),
}
