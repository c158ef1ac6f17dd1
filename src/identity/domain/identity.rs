//! Identity records as seen by callers and as handed to the store.

use super::{IdentityId, PasswordHash, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Public view of a stored identity.
///
/// This is everything a caller may learn about an identity; the password
/// hash stays inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySummary {
    id: IdentityId,
    username: Username,
    created_at: DateTime<Utc>,
}

impl IdentitySummary {
    /// Reconstructs a summary from persisted values.
    #[must_use]
    pub const fn from_persisted(
        id: IdentityId,
        username: Username,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            created_at,
        }
    }

    /// Returns the identity identifier.
    #[must_use]
    pub const fn id(&self) -> IdentityId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parameter object for inserting a new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    /// Username to register.
    pub username: Username,
    /// Hash of the chosen password.
    pub password_hash: PasswordHash,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewIdentity {
    /// Creates an insert payload stamped with the clock's current time.
    #[must_use]
    pub fn new(username: Username, password_hash: PasswordHash, clock: &impl Clock) -> Self {
        Self {
            username,
            password_hash,
            created_at: clock.utc(),
        }
    }
}
