//! Repository port for identity persistence and credential lookup.

use crate::identity::domain::{IdentitySummary, NewIdentity, PasswordHash, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity repository operations.
pub type IdentityRepositoryResult<T> = Result<T, IdentityRepositoryError>;

/// Identity persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Stores a new identity and returns its public summary.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::Conflict`] when the username is
    /// already registered.
    async fn create_identity(
        &self,
        identity: &NewIdentity,
    ) -> IdentityRepositoryResult<IdentitySummary>;

    /// Returns the stored password hash for a username.
    ///
    /// Returns `None` when no identity has that username.
    async fn get_password_hash(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<PasswordHash>>;

    /// Returns the public summary of an identity.
    ///
    /// Returns `None` when no identity has that username.
    async fn find_identity(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<IdentitySummary>>;

    /// Replaces the password hash of an identity.
    ///
    /// Only reachable after the identity has been verified.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::NotFound`] when no row matched, so
    /// an update of a vanished identity is never mistaken for success.
    async fn update_password(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> IdentityRepositoryResult<()>;

    /// Deletes an identity that owns no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::OwnsTasks`] while tasks still
    /// reference the username and [`IdentityRepositoryError::NotFound`] when
    /// no row matched.
    async fn delete_identity(&self, username: &Username) -> IdentityRepositoryResult<()>;

    /// Returns all identities ordered by identifier.
    async fn list_identities(&self) -> IdentityRepositoryResult<Vec<IdentitySummary>>;
}

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityRepositoryError {
    /// The username is already registered.
    #[error("username already taken: {0}")]
    Conflict(Username),

    /// No identity has the username.
    #[error("identity not found: {0}")]
    NotFound(Username),

    /// Tasks still reference the identity.
    #[error("identity still owns tasks: {0}")]
    OwnsTasks(Username),

    /// A competing writer held the store for longer than the wait bound.
    #[error("store contention: {0}")]
    Contention(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a contention error.
    pub fn contention(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Contention(Arc::new(err))
    }

    /// Returns `true` when retrying the operation may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Contention(_))
    }
}

impl From<diesel::result::Error> for IdentityRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        // Constraint violations carry no usable identifiers; adapters map the
        // ones they expect before falling back to this conversion.
        if crate::storage::blocking::is_contention(&err) {
            return Self::contention(err);
        }
        Self::persistence(err)
    }
}
