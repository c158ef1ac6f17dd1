//! Service layer for owner-scoped task creation, update, and removal.

use crate::identity::domain::Username;
use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId, TaskTitle, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating or replacing a task.
///
/// Updates replace both mutable fields, so an update request that leaves
/// `completed` unset marks the task as not completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    title: String,
    completed: bool,
}

impl TaskRequest {
    /// Creates a request with the given title and `completed` unset.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Owner-scoped task orchestration service.
///
/// Every method takes the owner as a verified [`Username`]; the service never
/// reads ownership from request payloads.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Lists the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store lookup fails.
    pub async fn list(&self, owner: &Username) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_tasks(owner).await?)
    }

    /// Creates a task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank title and
    /// [`TaskServiceError::Repository`] when the owner is unknown or the store
    /// rejects the write.
    pub async fn create(&self, owner: &Username, request: TaskRequest) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let task = NewTask::new(owner.clone(), title, request.completed, &*self.clock);
        let created = self.repository.create_task(&task).await?;
        tracing::debug!(id = %created.id(), owner = %owner, "task created");
        Ok(created)
    }

    /// Replaces the title and completion flag of one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank title and
    /// [`TaskServiceError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the owner has no such task.
    pub async fn update(
        &self,
        owner: &Username,
        id: TaskId,
        request: TaskRequest,
    ) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let update = TaskUpdate::new(title, request.completed, &*self.clock);
        Ok(self.repository.update_task(id, owner, &update).await?)
    }

    /// Deletes one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the owner has no such task.
    pub async fn delete(&self, owner: &Username, id: TaskId) -> TaskServiceResult<()> {
        self.repository.delete_task(id, owner).await?;
        tracing::debug!(id = %id, owner = %owner, "task deleted");
        Ok(())
    }
}
