//! In-memory identity repository and account removal.

use async_trait::async_trait;

use crate::identity::{
    domain::{IdentityId, IdentitySummary, NewIdentity, PasswordHash, Username},
    ports::{
        AccountRemoval, AccountRemovalReport, IdentityRepository, IdentityRepositoryError,
        IdentityRepositoryResult,
    },
};
use crate::storage::memory::{MemoryDatabase, StoredIdentity};

/// Thread-safe in-memory identity repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityRepository {
    database: MemoryDatabase,
}

impl InMemoryIdentityRepository {
    /// Creates a repository over the given tables.
    ///
    /// Share the database with an [`crate::task::adapters::memory::InMemoryTaskRepository`]
    /// so task ownership is checked against these identities.
    #[must_use]
    pub const fn new(database: MemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create_identity(
        &self,
        identity: &NewIdentity,
    ) -> IdentityRepositoryResult<IdentitySummary> {
        let mut tables = self
            .database
            .write()
            .map_err(IdentityRepositoryError::persistence)?;
        if tables.identity_key(&identity.username).is_some() {
            return Err(IdentityRepositoryError::Conflict(identity.username.clone()));
        }

        let id = IdentityId::new(tables.next_identity_id())
            .map_err(IdentityRepositoryError::persistence)?;
        let summary =
            IdentitySummary::from_persisted(id, identity.username.clone(), identity.created_at);
        tables.identities.insert(
            id.value(),
            StoredIdentity {
                summary: summary.clone(),
                password_hash: identity.password_hash.clone(),
            },
        );
        Ok(summary)
    }

    async fn get_password_hash(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<PasswordHash>> {
        let tables = self
            .database
            .read()
            .map_err(IdentityRepositoryError::persistence)?;
        Ok(tables
            .identity(username)
            .map(|stored| stored.password_hash.clone()))
    }

    async fn find_identity(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<IdentitySummary>> {
        let tables = self
            .database
            .read()
            .map_err(IdentityRepositoryError::persistence)?;
        Ok(tables.identity(username).map(|stored| stored.summary.clone()))
    }

    async fn update_password(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> IdentityRepositoryResult<()> {
        let mut tables = self
            .database
            .write()
            .map_err(IdentityRepositoryError::persistence)?;
        let id = tables
            .identity_key(username)
            .ok_or_else(|| IdentityRepositoryError::NotFound(username.clone()))?;
        let stored = tables
            .identities
            .get_mut(&id)
            .ok_or_else(|| IdentityRepositoryError::NotFound(username.clone()))?;
        stored.password_hash = password_hash.clone();
        Ok(())
    }

    async fn delete_identity(&self, username: &Username) -> IdentityRepositoryResult<()> {
        let mut tables = self
            .database
            .write()
            .map_err(IdentityRepositoryError::persistence)?;
        let id = tables
            .identity_key(username)
            .ok_or_else(|| IdentityRepositoryError::NotFound(username.clone()))?;
        if tables.owns_tasks(username) {
            return Err(IdentityRepositoryError::OwnsTasks(username.clone()));
        }
        tables.identities.remove(&id);
        Ok(())
    }

    async fn list_identities(&self) -> IdentityRepositoryResult<Vec<IdentitySummary>> {
        let tables = self
            .database
            .read()
            .map_err(IdentityRepositoryError::persistence)?;
        Ok(tables
            .identities
            .values()
            .map(|stored| stored.summary.clone())
            .collect())
    }
}

/// In-memory account removal over shared tables.
///
/// Both steps run under one write lock, so no reader ever observes the
/// identity without its tasks removed or the tasks removed while the
/// identity remains.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRemoval {
    database: MemoryDatabase,
}

impl InMemoryAccountRemoval {
    /// Creates an account removal adapter over the given tables.
    #[must_use]
    pub const fn new(database: MemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl AccountRemoval for InMemoryAccountRemoval {
    async fn remove_account(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<AccountRemovalReport> {
        let mut tables = self
            .database
            .write()
            .map_err(IdentityRepositoryError::persistence)?;
        let id = tables
            .identity_key(username)
            .ok_or_else(|| IdentityRepositoryError::NotFound(username.clone()))?;

        let tasks_removed = tables.remove_tasks_of(username);
        tables.identities.remove(&id);
        Ok(AccountRemovalReport { tasks_removed })
    }
}
