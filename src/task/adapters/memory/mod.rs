//! In-memory repository for owner-scoped tasks.

use async_trait::async_trait;

use crate::identity::domain::Username;
use crate::storage::memory::MemoryDatabase;
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Owner checks consult the identities held in the same [`MemoryDatabase`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    database: MemoryDatabase,
}

impl InMemoryTaskRepository {
    /// Creates a repository over the given tables.
    #[must_use]
    pub const fn new(database: MemoryDatabase) -> Self {
        Self { database }
    }
}

/// Returns `true` when the stored task matches both id and owner.
fn owned_by(task: &Task, id: TaskId, owner: &Username) -> bool {
    task.id() == id && task.owner() == owner
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_tasks(&self, owner: &Username) -> TaskRepositoryResult<Vec<Task>> {
        let tables = self
            .database
            .read()
            .map_err(TaskRepositoryError::persistence)?;
        Ok(tables
            .tasks
            .values()
            .filter(|task| task.owner() == owner)
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut tables = self
            .database
            .write()
            .map_err(TaskRepositoryError::persistence)?;
        if tables.identity_key(&task.owner).is_none() {
            return Err(TaskRepositoryError::UnknownOwner(task.owner.clone()));
        }

        let id = TaskId::new(tables.next_task_id()).map_err(TaskRepositoryError::persistence)?;
        let stored = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title.clone(),
            completed: task.completed,
            owner: task.owner.clone(),
            created_at: task.created_at,
            updated_at: task.created_at,
        });
        tables.tasks.insert(id.value(), stored.clone());
        Ok(stored)
    }

    async fn update_task(
        &self,
        id: TaskId,
        owner: &Username,
        update: &TaskUpdate,
    ) -> TaskRepositoryResult<Task> {
        let mut tables = self
            .database
            .write()
            .map_err(TaskRepositoryError::persistence)?;
        let stored = tables
            .tasks
            .get_mut(&id.value())
            .filter(|task| owned_by(task, id, owner))
            .ok_or(TaskRepositoryError::NotFound(id))?;
        *stored = stored.with_update(update);
        Ok(stored.clone())
    }

    async fn delete_task(&self, id: TaskId, owner: &Username) -> TaskRepositoryResult<()> {
        let mut tables = self
            .database
            .write()
            .map_err(TaskRepositoryError::persistence)?;
        let matches = tables
            .tasks
            .get(&id.value())
            .is_some_and(|task| owned_by(task, id, owner));
        if !matches {
            return Err(TaskRepositoryError::NotFound(id));
        }
        tables.tasks.remove(&id.value());
        Ok(())
    }

    async fn delete_all_for_owner(&self, owner: &Username) -> TaskRepositoryResult<u64> {
        let mut tables = self
            .database
            .write()
            .map_err(TaskRepositoryError::persistence)?;
        Ok(tables.remove_tasks_of(owner))
    }
}
