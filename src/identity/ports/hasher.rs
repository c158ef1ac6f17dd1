//! Password hashing port.

use crate::identity::domain::{Password, PasswordHash};
use thiserror::Error;

/// One-way adaptive password hashing.
///
/// Implementations are synchronous and CPU-bound; services call them from
/// the blocking thread pool.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the hash cannot be computed. Callers
    /// must treat this as an internal failure, never as an empty hash.
    fn hash(&self, password: &Password) -> Result<PasswordHash, HashingError>;

    /// Checks a candidate password against a stored hash.
    ///
    /// Returns `false` on mismatch and on a malformed stored hash.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> bool;
}

/// Failure to compute a password hash.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct HashingError(pub String);

impl HashingError {
    /// Creates a hashing error from any displayable cause.
    #[must_use]
    pub fn new(cause: impl ToString) -> Self {
        Self(cause.to_string())
    }
}
