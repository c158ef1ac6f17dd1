//! Credentials as claimed by an incoming request.

use std::fmt;

/// Unverified username and password taken from a request.
///
/// Either part may be missing; the verifier rejects such claims before it
/// touches the store.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClaimedCredentials {
    username: Option<String>,
    password: Option<String>,
}

impl ClaimedCredentials {
    /// Creates a claim from optional raw values.
    #[must_use]
    pub const fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// Creates a claim with both parts present.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(Some(username.into()), Some(password.into()))
    }

    /// Returns the claimed username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the claimed password, if any.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Debug for ClaimedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimedCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
