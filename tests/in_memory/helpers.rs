//! Shared test helpers for in-memory adapter integration tests.

use tasklist::identity::{
    adapters::memory::{InMemoryAccountRemoval, InMemoryIdentityRepository},
    domain::{NewIdentity, PasswordHash, Username},
    ports::IdentityRepository,
};
use tasklist::storage::MemoryDatabase;
use tasklist::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, TaskTitle},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Adapters sharing one set of in-memory tables.
pub struct Stores {
    pub identities: InMemoryIdentityRepository,
    pub tasks: InMemoryTaskRepository,
    pub removal: InMemoryAccountRemoval,
}

/// Provides fresh adapters over empty tables for each test.
#[fixture]
pub fn stores() -> Stores {
    let database = MemoryDatabase::new();
    Stores {
        identities: InMemoryIdentityRepository::new(database.clone()),
        tasks: InMemoryTaskRepository::new(database.clone()),
        removal: InMemoryAccountRemoval::new(database),
    }
}

/// Parses a username known to be valid.
pub fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

/// Builds an identity insert with a placeholder hash.
pub fn new_identity(raw: &str) -> NewIdentity {
    NewIdentity::new(
        username(raw),
        PasswordHash::from_stored(format!("$argon2id$placeholder-for-{raw}")),
        &DefaultClock,
    )
}

/// Registers `raw` and returns its username.
pub async fn register(stores: &Stores, raw: &str) -> Username {
    stores
        .identities
        .create_identity(&new_identity(raw))
        .await
        .expect("identity creation should succeed");
    username(raw)
}

/// Builds a task insert for `owner`.
pub fn new_task(owner: &Username, title: &str) -> NewTask {
    NewTask::new(
        owner.clone(),
        TaskTitle::new(title).expect("valid title"),
        false,
        &DefaultClock,
    )
}
