//! `SQLite` adapters for owner-scoped task persistence.

mod models;
mod repository;

pub(crate) use repository::delete_tasks_of_owner;
pub use repository::SqliteTaskRepository;
