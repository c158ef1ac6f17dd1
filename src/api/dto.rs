//! Request bodies and response views.
//!
//! Request bodies only carry client-settable fields. Unknown fields such as
//! `id`, `owner`, or `user` are ignored, so a client cannot choose a task id
//! or an owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::domain::{IdentityId, IdentitySummary, Username};
use crate::task::domain::{Task, TaskId, TaskTitle};

/// Body of a registration request.
#[derive(Clone, Deserialize)]
pub struct CreateUserBody {
    /// Requested username.
    #[serde(default)]
    pub username: String,
    /// Chosen password.
    #[serde(default)]
    pub password: String,
}

/// Body of a password change.
#[derive(Clone, Deserialize)]
pub struct UpdatePasswordBody {
    /// New password.
    #[serde(default)]
    pub password: String,
}

/// Body of a task create or update.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskBody {
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Completion flag; `false` when omitted.
    #[serde(default)]
    pub completed: bool,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    /// Account identifier.
    pub id: IdentityId,
    /// Username.
    pub username: Username,
}

impl From<&IdentitySummary> for UserView {
    fn from(summary: &IdentitySummary) -> Self {
        Self {
            id: summary.id(),
            username: summary.username().clone(),
        }
    }
}

/// Confirmation returned after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCreatedView {
    /// Fixed confirmation text.
    pub message: &'static str,
    /// Registered username.
    pub username: Username,
}

/// Fixed confirmation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    /// Message text.
    pub message: &'static str,
}

/// Wire form of a task. The owner is serialized as `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: TaskTitle,
    /// Completion flag.
    pub completed: bool,
    /// Owning username.
    pub user: Username,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().clone(),
            completed: task.completed(),
            user: task.owner().clone(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
