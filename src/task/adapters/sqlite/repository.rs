//! `SQLite` repository implementation for owner-scoped task storage.

use super::models::{NewTaskRow, TaskChangeset, TaskRow};
use crate::identity::domain::Username;
use crate::storage::{
    SqlitePool,
    blocking::{get_conn_with, run_blocking_with},
    schema::{identities, tasks},
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskTitle, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::contention)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn list_tasks(&self, owner: &Username) -> TaskRepositoryResult<Vec<Task>> {
        let lookup = owner.clone();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner.eq(lookup.as_str()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn create_task(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let owner = task.owner.clone();
        let new_row = NewTaskRow {
            title: task.title.as_str().to_owned(),
            completed: task.completed,
            owner: task.owner.as_str().to_owned(),
            created_at: task.created_at,
            updated_at: task.created_at,
        };

        let row = self
            .run_blocking(move |connection| {
                connection.immediate_transaction(|tx| {
                    // The foreign key still rejects an owner deleted after
                    // this check.
                    let owners: i64 = identities::table
                        .filter(identities::username.eq(owner.as_str()))
                        .count()
                        .get_result(tx)?;
                    if owners == 0 {
                        return Err(TaskRepositoryError::UnknownOwner(owner.clone()));
                    }

                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(tx)
                        .map_err(|err| match err {
                            DieselError::DatabaseError(
                                DatabaseErrorKind::ForeignKeyViolation,
                                _,
                            ) => TaskRepositoryError::UnknownOwner(owner.clone()),
                            other => TaskRepositoryError::from(other),
                        })
                })
            })
            .await?;
        tracing::debug!(id = row.id, owner = %row.owner, "task inserted");
        row_to_task(row)
    }

    async fn update_task(
        &self,
        id: TaskId,
        owner: &Username,
        update: &TaskUpdate,
    ) -> TaskRepositoryResult<Task> {
        let target_owner = owner.clone();
        let changeset = TaskChangeset {
            title: update.title.as_str().to_owned(),
            completed: update.completed,
            updated_at: update.updated_at,
        };

        self.run_blocking(move |connection| {
            let row = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::owner.eq(target_owner.as_str())),
            )
            .set(&changeset)
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()?;
            row.ok_or(TaskRepositoryError::NotFound(id))
                .and_then(row_to_task)
        })
        .await
    }

    async fn delete_task(&self, id: TaskId, owner: &Username) -> TaskRepositoryResult<()> {
        let target_owner = owner.clone();
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::owner.eq(target_owner.as_str())),
            )
            .execute(connection)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_all_for_owner(&self, owner: &Username) -> TaskRepositoryResult<u64> {
        let target_owner = owner.clone();
        self.run_blocking(move |connection| {
            let removed = delete_tasks_of_owner(connection, &target_owner)?;
            u64::try_from(removed).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Deletes every task of the owner on an open connection.
///
/// Shared with account removal, which runs it inside its own transaction.
pub(crate) fn delete_tasks_of_owner(
    connection: &mut SqliteConnection,
    owner: &Username,
) -> QueryResult<usize> {
    diesel::delete(tasks::table.filter(tasks::owner.eq(owner.as_str()))).execute(connection)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        completed,
        owner,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskRepositoryError::persistence)?,
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        completed,
        owner: Username::new(owner).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
