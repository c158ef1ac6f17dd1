//! Storage plumbing shared by the identity and task adapters.
//!
//! - [`pool`]: `SQLite` connection pool with per-connection pragmas
//! - [`migrations`]: Idempotent schema bootstrap
//! - [`memory`]: Shared in-memory tables backing the in-memory adapters
//! - [`schema`]: Diesel table definitions

pub(crate) mod blocking;
mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod schema;

pub use error::StorageError;
pub use memory::MemoryDatabase;
pub use pool::{SqlitePool, build_pool};

use crate::config::DatabaseConfig;

/// Opens the configured database and ensures the schema exists.
///
/// Failures here are unrecoverable: the service must not start against a
/// database without its tables and constraints.
///
/// # Errors
///
/// Returns [`StorageError`] when the pool cannot be built or the schema
/// cannot be applied.
pub fn open(config: &DatabaseConfig) -> Result<SqlitePool, StorageError> {
    let pool = build_pool(config)?;
    migrations::run_migrations(&pool)?;
    tracing::info!(url = %config.url, "database ready");
    Ok(pool)
}
