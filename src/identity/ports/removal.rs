//! Port for removing an account together with everything it owns.

use super::IdentityRepositoryResult;
use crate::identity::domain::Username;
use async_trait::async_trait;

/// All-or-nothing account removal.
///
/// Implementations delete the owner's tasks first and the identity second,
/// and commit both or neither. A failure of the first step must leave the
/// identity untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRemoval: Send + Sync {
    /// Removes the identity and every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`super::IdentityRepositoryError::NotFound`] when the identity
    /// does not exist, or another repository error when either step fails.
    /// Nothing is removed in the error case.
    async fn remove_account(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<AccountRemovalReport>;
}

/// Outcome of a successful account removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRemovalReport {
    /// Number of tasks deleted along with the identity.
    pub tasks_removed: u64,
}
