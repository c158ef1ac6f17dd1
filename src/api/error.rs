//! Mapping from service failures to response statuses.

use serde_json::json;
use std::fmt;
use thiserror::Error;

use super::{ApiResponse, Status};
use crate::identity::{
    ports::IdentityRepositoryError,
    services::{AccountError, AuthError},
};
use crate::task::{domain::TaskDomainError, ports::TaskRepositoryError, services::TaskServiceError};

const TASK_NOT_FOUND: &str = "todo not found for user";
const USER_NOT_FOUND: &str = "user not found";

/// Handler-level failure with a fixed status.
///
/// Internal failures are logged when they are converted and carry only a
/// generic message, so store or hashing details never reach a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Either credential header is absent or blank.
    #[error("missing authentication credentials")]
    MissingCredentials,
    /// The request body or path failed validation.
    #[error("{0}")]
    InvalidInput(String),
    /// The credentials did not verify.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The verified user vanished before its task could be stored.
    #[error("user does not exist")]
    UnknownOwner,
    /// The addressed resource does not exist for the caller.
    #[error("{0}")]
    NotFound(&'static str),
    /// The resource already exists.
    #[error("{0}")]
    Conflict(&'static str),
    /// The store stayed locked for longer than the busy timeout.
    #[error("store busy, retry later")]
    Contention,
    /// Unexpected failure.
    #[error("internal error")]
    Internal,
}

impl ApiError {
    /// Logs `err` and returns [`ApiError::Internal`].
    pub fn internal(err: &dyn fmt::Display) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::Internal
    }

    /// Returns the response status for this error.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::MissingCredentials | Self::InvalidInput(_) => Status::BadRequest,
            Self::InvalidCredentials | Self::UnknownOwner => Status::Unauthorized,
            Self::NotFound(_) => Status::NotFound,
            Self::Conflict(_) => Status::Conflict,
            Self::Contention => Status::ServiceUnavailable,
            Self::Internal => Status::InternalServerError,
        }
    }

    /// Renders the error as a `{"message": ...}` response.
    #[must_use]
    pub fn into_response(self) -> ApiResponse {
        ApiResponse {
            status: self.status(),
            body: Some(json!({ "message": self.to_string() })),
        }
    }

    fn contention(err: &dyn fmt::Display) -> Self {
        tracing::warn!(error = %err, "store contention");
        Self::Contention
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => Self::MissingCredentials,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
        }
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(format!("malformed request body: {err}"))
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Domain(domain) => Self::InvalidInput(domain.to_string()),
            AccountError::Repository(IdentityRepositoryError::Conflict(_)) => {
                Self::Conflict("username already exists")
            }
            AccountError::Repository(IdentityRepositoryError::NotFound(_)) => {
                Self::NotFound(USER_NOT_FOUND)
            }
            AccountError::Repository(repository @ IdentityRepositoryError::Contention(_)) => {
                Self::contention(&repository)
            }
            AccountError::Repository(repository) => Self::internal(&repository),
            AccountError::Hashing(hashing) => Self::internal(&hashing),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(domain) => domain.into(),
            TaskServiceError::Repository(TaskRepositoryError::UnknownOwner(_)) => {
                Self::UnknownOwner
            }
            TaskServiceError::Repository(TaskRepositoryError::NotFound(_)) => {
                Self::NotFound(TASK_NOT_FOUND)
            }
            TaskServiceError::Repository(repository @ TaskRepositoryError::Contention(_)) => {
                Self::contention(&repository)
            }
            TaskServiceError::Repository(repository) => Self::internal(&repository),
        }
    }
}
