//! Transactional account removal tests.
//!
//! Failures are injected with `RAISE(ABORT)` triggers so that one step of
//! the removal fails after the other has run inside the transaction.

use super::helpers::{SqliteStores, count_rows, new_identity, new_task, register, stores, username};
use rstest::rstest;
use tasklist::identity::ports::{AccountRemoval, IdentityRepository, IdentityRepositoryError};
use tasklist::task::ports::TaskRepository;

async fn alice_with_two_tasks(stores: &SqliteStores) {
    let alice = register(stores, "alice").await;
    for title in ["buy milk", "walk dog"] {
        stores
            .tasks
            .create_task(&new_task(&alice, title))
            .await
            .expect("task creation should succeed");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removal_deletes_tasks_then_identity(stores: SqliteStores) {
    alice_with_two_tasks(&stores).await;
    register(&stores, "bob").await;

    let report = stores
        .removal
        .remove_account(&username("alice"))
        .await
        .expect("removal should succeed");

    assert_eq!(report.tasks_removed, 2);
    assert_eq!(count_rows(&stores, "identities", "username = 'alice'"), 0);
    assert_eq!(count_rows(&stores, "tasks", "owner = 'alice'"), 0);
    assert_eq!(count_rows(&stores, "identities", "username = 'bob'"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_task_delete_leaves_identity_intact(stores: SqliteStores) {
    alice_with_two_tasks(&stores).await;
    stores.execute(
        "CREATE TRIGGER block_task_delete BEFORE DELETE ON tasks \
         BEGIN SELECT RAISE(ABORT, 'task delete blocked'); END;",
    );

    let result = stores.removal.remove_account(&username("alice")).await;

    assert!(matches!(result, Err(IdentityRepositoryError::Persistence(_))));
    assert_eq!(count_rows(&stores, "identities", "username = 'alice'"), 1);
    assert_eq!(count_rows(&stores, "tasks", "owner = 'alice'"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_identity_delete_restores_tasks(stores: SqliteStores) {
    alice_with_two_tasks(&stores).await;
    stores.execute(
        "CREATE TRIGGER block_identity_delete BEFORE DELETE ON identities \
         BEGIN SELECT RAISE(ABORT, 'identity delete blocked'); END;",
    );

    let result = stores.removal.remove_account(&username("alice")).await;

    assert!(result.is_err());
    assert_eq!(count_rows(&stores, "identities", "username = 'alice'"), 1);
    assert_eq!(count_rows(&stores, "tasks", "owner = 'alice'"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_unknown_account_is_not_found(stores: SqliteStores) {
    let result = stores.removal.remove_account(&username("ghost")).await;
    assert!(matches!(result, Err(IdentityRepositoryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recreated_username_starts_empty(stores: SqliteStores) {
    alice_with_two_tasks(&stores).await;
    stores
        .removal
        .remove_account(&username("alice"))
        .await
        .expect("removal should succeed");

    let recreated = stores
        .identities
        .create_identity(&new_identity("alice"))
        .await
        .expect("re-registration should succeed");

    assert!(recreated.id().value() > 1);
    let tasks = stores
        .tasks
        .list_tasks(&username("alice"))
        .await
        .expect("list should succeed");
    assert!(tasks.is_empty());
}
