//! Account registration, password rotation, and removal.

use super::blocking::hash_off_thread;
use crate::identity::{
    domain::{IdentityDomainError, IdentitySummary, NewIdentity, Password, Username},
    ports::{
        AccountRemoval, AccountRemovalReport, HashingError, IdentityRepository,
        IdentityRepositoryError, PasswordHasher,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new account.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterAccountRequest {
    username: String,
    password: String,
}

impl RegisterAccountRequest {
    /// Creates a registration request from raw input.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for RegisterAccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterAccountRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] HashingError),
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Account lifecycle orchestration service.
///
/// Operations other than [`AccountService::register`] and
/// [`AccountService::list_accounts`] take a username the caller has already
/// verified.
pub struct AccountService<R, H, A, C>
where
    R: IdentityRepository,
    H: PasswordHasher + 'static,
    A: AccountRemoval,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    removal: Arc<A>,
    clock: Arc<C>,
}

impl<R, H, A, C> Clone for AccountService<R, H, A, C>
where
    R: IdentityRepository,
    H: PasswordHasher + 'static,
    A: AccountRemoval,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: Arc::clone(&self.hasher),
            removal: Arc::clone(&self.removal),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, H, A, C> AccountService<R, H, A, C>
where
    R: IdentityRepository,
    H: PasswordHasher + 'static,
    A: AccountRemoval,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>, removal: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            removal,
            clock,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for a blank username or empty
    /// password, [`AccountError::Hashing`] when the hash cannot be computed,
    /// and [`AccountError::Repository`] with
    /// [`IdentityRepositoryError::Conflict`] for a taken username.
    pub async fn register(&self, request: RegisterAccountRequest) -> AccountResult<IdentitySummary> {
        let username = Username::new(request.username)?;
        let password = Password::new(request.password)?;
        let password_hash = hash_off_thread(&self.hasher, password).await?;

        let identity = NewIdentity::new(username, password_hash, &*self.clock);
        let summary = self.repository.create_identity(&identity).await?;
        tracing::info!(id = %summary.id(), username = %summary.username(), "account registered");
        Ok(summary)
    }

    /// Returns the public summary of a verified account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::NotFound`] when the account vanished
    /// after verification, or another repository error.
    pub async fn profile(&self, username: &Username) -> AccountResult<IdentitySummary> {
        self.repository
            .find_identity(username)
            .await?
            .ok_or_else(|| IdentityRepositoryError::NotFound(username.clone()).into())
    }

    /// Replaces the password of a verified account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for an empty password,
    /// [`AccountError::Hashing`] when hashing fails, and
    /// [`AccountError::Repository`] when the update matched no row or failed.
    pub async fn change_password(
        &self,
        username: &Username,
        new_password: impl Into<String>,
    ) -> AccountResult<()> {
        let password = Password::new(new_password)?;
        let password_hash = hash_off_thread(&self.hasher, password).await?;
        self.repository
            .update_password(username, &password_hash)
            .await?;
        tracing::info!(username = %username, "password changed");
        Ok(())
    }

    /// Removes a verified account together with all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when removal fails; nothing is
    /// removed in that case.
    pub async fn delete_account(&self, username: &Username) -> AccountResult<AccountRemovalReport> {
        let report = self.removal.remove_account(username).await?;
        tracing::info!(
            username = %username,
            tasks_removed = report.tasks_removed,
            "account deleted"
        );
        Ok(report)
    }

    /// Lists every registered account in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when the lookup fails.
    pub async fn list_accounts(&self) -> AccountResult<Vec<IdentitySummary>> {
        Ok(self.repository.list_identities().await?)
    }
}
