//! Shared in-memory tables for the in-memory adapters.
//!
//! The identity and task adapters wrap the same [`MemoryDatabase`], so the
//! owner reference from tasks to identities and the two-step account
//! removal can be enforced under a single lock, as the `SQLite` store does
//! with its foreign key and transactions.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::identity::domain::{IdentitySummary, PasswordHash, Username};
use crate::task::domain::Task;

/// Thread-safe handle to a set of in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<RwLock<MemoryTables>>,
}

/// Identity row as held in memory.
#[derive(Debug, Clone)]
pub(crate) struct StoredIdentity {
    pub(crate) summary: IdentitySummary,
    pub(crate) password_hash: PasswordHash,
}

/// Table contents guarded by the database lock.
///
/// Identifiers are allocated from monotonic counters and never reused, like
/// `SQLite`'s `AUTOINCREMENT`.
#[derive(Debug, Default)]
pub(crate) struct MemoryTables {
    pub(crate) identities: BTreeMap<i64, StoredIdentity>,
    pub(crate) tasks: BTreeMap<i64, Task>,
    last_identity_id: i64,
    last_task_id: i64,
}

impl MemoryTables {
    pub(crate) const fn next_identity_id(&mut self) -> i64 {
        self.last_identity_id += 1;
        self.last_identity_id
    }

    pub(crate) const fn next_task_id(&mut self) -> i64 {
        self.last_task_id += 1;
        self.last_task_id
    }

    pub(crate) fn identity_key(&self, username: &Username) -> Option<i64> {
        self.identities
            .iter()
            .find(|(_, stored)| stored.summary.username() == username)
            .map(|(id, _)| *id)
    }

    pub(crate) fn identity(&self, username: &Username) -> Option<&StoredIdentity> {
        self.identity_key(username)
            .and_then(|id| self.identities.get(&id))
    }

    pub(crate) fn owns_tasks(&self, username: &Username) -> bool {
        self.tasks.values().any(|task| task.owner() == username)
    }

    /// Removes the owner's tasks and returns how many were removed.
    pub(crate) fn remove_tasks_of(&mut self, owner: &Username) -> u64 {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| task.owner() != owner);
        u64::try_from(before.saturating_sub(self.tasks.len())).unwrap_or(u64::MAX)
    }
}

/// The lock was poisoned by a panic in another holder.
#[derive(Debug, Clone, Error)]
#[error("in-memory store lock poisoned: {0}")]
pub struct PoisonedStore(String);

impl MemoryDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, MemoryTables>, PoisonedStore> {
        self.state
            .read()
            .map_err(|err| PoisonedStore(err.to_string()))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryTables>, PoisonedStore> {
        self.state
            .write()
            .map_err(|err| PoisonedStore(err.to_string()))
    }
}
