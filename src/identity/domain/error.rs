//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The identity identifier is not a positive integer.
    #[error("invalid identity id {0}, expected a positive integer")]
    InvalidIdentityId(i64),
}
