//! Schema bootstrap for the `SQLite` store.

use diesel::connection::SimpleConnection;

use super::{SqlitePool, StorageError};

/// SQL creating the identity and task tables, constraints, and indexes.
pub const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/00000000000000_create_tasklist_tables/up.sql");

/// SQL dropping everything [`CREATE_TABLES_SQL`] creates.
pub const DROP_TABLES_SQL: &str =
    include_str!("../../migrations/00000000000000_create_tasklist_tables/down.sql");

/// Applies the schema to the pooled database.
///
/// Every statement uses `IF NOT EXISTS`, so running this against an existing
/// database is a no-op.
///
/// # Errors
///
/// Returns [`StorageError`] if a connection cannot be obtained or a schema
/// statement fails.
pub fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    let mut conn = pool.get()?;
    conn.batch_execute(CREATE_TABLES_SQL)?;
    tracing::debug!("schema applied");
    Ok(())
}
