//! Application services for owner-scoped task operations.

mod lifecycle;

pub use lifecycle::{TaskRequest, TaskService, TaskServiceError, TaskServiceResult};
