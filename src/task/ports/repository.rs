//! Repository port for owner-scoped task persistence.

use crate::identity::domain::Username;
use crate::task::domain::{NewTask, Task, TaskId, TaskUpdate};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation takes an owner that the caller has already verified; the
/// repository does not authenticate, it only filters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns the owner's tasks ordered by identifier.
    ///
    /// An owner without tasks yields an empty list.
    async fn list_tasks(&self, owner: &Username) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::UnknownOwner`] when no identity has the
    /// owner's username. No row is written in that case.
    async fn create_task(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Applies an update to the task matching both `id` and `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task matches both,
    /// whether the id is unknown or belongs to another owner.
    async fn update_task(
        &self,
        id: TaskId,
        owner: &Username,
        update: &TaskUpdate,
    ) -> TaskRepositoryResult<Task>;

    /// Deletes the task matching both `id` and `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task matches both.
    async fn delete_task(&self, id: TaskId, owner: &Username) -> TaskRepositoryResult<()>;

    /// Deletes every task of the owner and returns how many were removed.
    async fn delete_all_for_owner(&self, owner: &Username) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The owner does not refer to an existing identity.
    #[error("unknown task owner: {0}")]
    UnknownOwner(Username),

    /// No task matched the id and owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A competing writer held the store for longer than the wait bound.
    #[error("store contention: {0}")]
    Contention(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a contention error.
    pub fn contention(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Contention(Arc::new(err))
    }

    /// Returns `true` when retrying the operation may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Contention(_))
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        // Constraint violations carry no usable identifiers; adapters map the
        // ones they expect before falling back to this conversion.
        if crate::storage::blocking::is_contention(&err) {
            return Self::contention(err);
        }
        Self::persistence(err)
    }
}
