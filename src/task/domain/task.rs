//! Task aggregate and the payloads used to create and change it.

use super::{TaskId, TaskTitle};
use crate::identity::domain::Username;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Task item owned by a single identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    completed: bool,
    owner: Username,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted owner.
    pub owner: Username,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            completed: data.completed,
            owner: data.owner,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the owning username.
    #[must_use]
    pub const fn owner(&self) -> &Username {
        &self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy with the update applied.
    ///
    /// Used by stores that apply updates in application memory.
    #[must_use]
    pub fn with_update(&self, update: &TaskUpdate) -> Self {
        Self {
            title: update.title.clone(),
            completed: update.completed,
            updated_at: update.updated_at,
            ..self.clone()
        }
    }
}

/// Insert payload for a new task. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Verified owner.
    pub owner: Username,
    /// Title.
    pub title: TaskTitle,
    /// Initial completion flag.
    pub completed: bool,
    /// Creation timestamp, also used as the first update timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates an insert payload stamped with the clock's current time.
    #[must_use]
    pub fn new(owner: Username, title: TaskTitle, completed: bool, clock: &impl Clock) -> Self {
        Self {
            owner,
            title,
            completed,
            created_at: clock.utc(),
        }
    }
}

/// Replacement values for a task's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    /// New title.
    pub title: TaskTitle,
    /// New completion flag.
    pub completed: bool,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskUpdate {
    /// Creates an update stamped with the clock's current time.
    #[must_use]
    pub fn new(title: TaskTitle, completed: bool, clock: &impl Clock) -> Self {
        Self {
            title,
            completed,
            updated_at: clock.utc(),
        }
    }
}
