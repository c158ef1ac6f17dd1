//! `SQLite` connection pool construction.

use std::time::Duration;

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};

use super::StorageError;
use crate::config::DatabaseConfig;

/// `SQLite` connection pool type used by the identity and task adapters.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Database url that opens a private in-memory database per connection.
const IN_MEMORY_URL: &str = ":memory:";

/// r2d2's default reaping of idle connections.
const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// r2d2's default upper bound on a connection's age.
const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Connection lifecycle limits handed to the pool builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PoolLimits {
    max_size: u32,
    min_idle: Option<u32>,
    idle_timeout: Option<Duration>,
    max_lifetime: Option<Duration>,
}

impl PoolLimits {
    fn for_config(config: &DatabaseConfig) -> Self {
        if config.url == IN_MEMORY_URL {
            // The database lives only as long as its single connection.
            Self {
                max_size: 1,
                min_idle: Some(1),
                idle_timeout: None,
                max_lifetime: None,
            }
        } else {
            Self {
                max_size: config.max_connections,
                min_idle: None,
                idle_timeout: Some(IDLE_TIMEOUT),
                max_lifetime: Some(MAX_LIFETIME),
            }
        }
    }
}

/// Pragmas applied once to every connection when the pool establishes it.
///
/// `foreign_keys` is per-connection in `SQLite`, so the owner reference on
/// tasks is only enforced when every connection switches it on.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas {
    busy_timeout: Duration,
    write_ahead_log: bool,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)?;
        if self.write_ahead_log {
            conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
                .map_err(diesel::r2d2::Error::QueryError)?;
        }
        Ok(())
    }
}

/// Builds a connection pool for the configured database.
///
/// A `:memory:` url is private to each connection, so the pool holds exactly
/// one connection and never retires it, keeping every caller on the same
/// database for the life of the pool.
///
/// # Errors
///
/// Returns [`StorageError::InvalidConfig`] for an empty url or zero-sized
/// pool, and [`StorageError::Pool`] when no connection can be established.
pub fn build_pool(config: &DatabaseConfig) -> Result<SqlitePool, StorageError> {
    if config.url.trim().is_empty() {
        return Err(StorageError::InvalidConfig(
            "database url must not be empty".to_owned(),
        ));
    }
    if config.max_connections == 0 {
        return Err(StorageError::InvalidConfig(
            "max_connections must be at least 1".to_owned(),
        ));
    }

    let limits = PoolLimits::for_config(config);
    let pragmas = ConnectionPragmas {
        busy_timeout: config.busy_timeout(),
        write_ahead_log: config.url != IN_MEMORY_URL,
    };

    let manager = ConnectionManager::<SqliteConnection>::new(config.url.as_str());
    let pool = Pool::builder()
        .max_size(limits.max_size)
        .min_idle(limits.min_idle)
        .idle_timeout(limits.idle_timeout)
        .max_lifetime(limits.max_lifetime)
        .connection_timeout(config.busy_timeout().max(Duration::from_secs(1)))
        .connection_customizer(Box::new(pragmas))
        .build(manager)?;
    tracing::debug!(url = %config.url, max_size = limits.max_size, "built sqlite pool");
    Ok(pool)
}
