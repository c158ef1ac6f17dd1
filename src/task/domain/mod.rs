//! Domain model for owner-scoped tasks.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::{NewTask, PersistedTaskData, Task, TaskUpdate};
