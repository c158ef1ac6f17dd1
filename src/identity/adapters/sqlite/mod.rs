//! `SQLite` adapters for identity persistence and account removal.

mod models;
mod removal;
mod repository;

pub use removal::SqliteAccountRemoval;
pub use repository::SqliteIdentityRepository;
pub(crate) use repository::delete_identity_row;
