//! Transport-neutral request handlers.
//!
//! Each handler takes request headers, an optional path id, and a raw JSON
//! body, and returns an [`ApiResponse`] carrying a status and a JSON body.
//! Credentials are read from the `X-User` and `X-Password` headers on every
//! request; there is no session state.
//!
//! - [`credentials`]: Header map and credential extraction
//! - [`dto`]: Request bodies and response views
//! - [`error`]: Error-to-status mapping
//! - [`handlers`]: The [`TaskListApi`] facade

pub mod credentials;
pub mod dto;
pub mod error;
pub mod handlers;
mod response;

pub use credentials::{PASSWORD_HEADER, RequestHeaders, USER_HEADER};
pub use error::ApiError;
pub use handlers::{InMemoryTaskListApi, SqliteTaskListApi, TaskListApi};
pub use response::{ApiResponse, Status};
