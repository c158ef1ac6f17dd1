//! Blocking operation helpers for the `SQLite` adapters.
//!
//! Diesel calls are synchronous, so every adapter offloads them to the
//! blocking thread pool and checks a connection out of the pool there.

use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, PoolError, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::SqlitePool;

/// Pooled connection type for internal use.
pub(crate) type PooledConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Runs a blocking task and maps join errors into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &SqlitePool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}

/// Returns `true` when `SQLite` gave up waiting for a competing writer.
///
/// `SQLITE_BUSY` and `SQLITE_LOCKED` surface through Diesel as unclassified
/// database errors, so the engine message is the only signal available.
pub(crate) fn is_contention(err: &DieselError) -> bool {
    let DieselError::DatabaseError(DatabaseErrorKind::Unknown, info) = err else {
        return false;
    };
    let message = info.message();
    message.contains("database is locked")
        || message.contains("database table is locked")
        || message.contains("database is busy")
}
