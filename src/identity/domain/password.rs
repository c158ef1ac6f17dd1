//! Plaintext password and stored hash wrappers.
//!
//! Neither type implements `Serialize`, and both redact their `Debug`
//! output, so a password or hash cannot leak through a response body or a
//! log line by accident.

use super::IdentityDomainError;
use std::fmt;

/// Plaintext password supplied by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a validated password.
    ///
    /// Passwords are not trimmed; leading and trailing spaces are part of the
    /// secret.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyPassword`] if the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(IdentityDomainError::EmptyPassword);
        }
        Ok(Self(raw))
    }

    /// Returns the plaintext for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Opaque, self-describing one-way password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps a stored hash string.
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the hash string for persistence or verification.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
