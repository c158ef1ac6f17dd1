//! Request headers and credential extraction.

use crate::identity::domain::ClaimedCredentials;

/// Header carrying the claimed username.
pub const USER_HEADER: &str = "X-User";

/// Header carrying the claimed password.
pub const PASSWORD_HEADER: &str = "X-Password";

/// Request header map with case-insensitive names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(String, String)>,
}

impl RequestHeaders {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the map with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` to `value`, replacing any earlier value for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let header = name.into();
        self.entries
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&header));
        self.entries.push((header, value.into()));
    }

    /// Returns the value of `name`, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns headers carrying the given username and password.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new()
            .with(USER_HEADER, username)
            .with(PASSWORD_HEADER, password)
    }

    /// Extracts the claimed credentials.
    ///
    /// Missing headers become absent parts; the verifier decides what that
    /// means.
    #[must_use]
    pub fn claimed_credentials(&self) -> ClaimedCredentials {
        ClaimedCredentials::new(
            self.get(USER_HEADER).map(str::to_owned),
            self.get(PASSWORD_HEADER).map(str::to_owned),
        )
    }
}
