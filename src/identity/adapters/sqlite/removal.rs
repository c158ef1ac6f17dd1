//! Transactional account removal for the `SQLite` store.

use super::delete_identity_row;
use crate::identity::{
    domain::Username,
    ports::{
        AccountRemoval, AccountRemovalReport, IdentityRepositoryError, IdentityRepositoryResult,
    },
};
use crate::storage::{
    SqlitePool,
    blocking::{get_conn_with, run_blocking_with},
};
use crate::task::adapters::sqlite::delete_tasks_of_owner;
use async_trait::async_trait;

/// Removes an account and its tasks in one immediate transaction.
///
/// The task delete runs first; if it fails, the transaction rolls back
/// before the identity row is touched. If the identity delete fails, the
/// task delete is rolled back with it.
#[derive(Debug, Clone)]
pub struct SqliteAccountRemoval {
    pool: SqlitePool,
}

impl SqliteAccountRemoval {
    /// Creates an account removal adapter from a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRemoval for SqliteAccountRemoval {
    async fn remove_account(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<AccountRemovalReport> {
        let pool = self.pool.clone();
        let target = username.clone();

        let report = run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, IdentityRepositoryError::contention)?;
                connection.immediate_transaction(|tx| {
                    let removed = delete_tasks_of_owner(tx, &target)?;
                    delete_identity_row(tx, &target)?;
                    let tasks_removed = u64::try_from(removed)
                        .map_err(IdentityRepositoryError::persistence)?;
                    Ok(AccountRemovalReport { tasks_removed })
                })
            },
            IdentityRepositoryError::persistence,
        )
        .await?;

        tracing::debug!(
            username = %username,
            tasks_removed = report.tasks_removed,
            "account removed"
        );
        Ok(report)
    }
}
