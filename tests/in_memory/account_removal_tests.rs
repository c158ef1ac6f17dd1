//! In-memory tests for cascading account removal.

use super::helpers::{Stores, new_identity, new_task, register, stores, username};
use tasklist::identity::ports::{AccountRemoval, IdentityRepository, IdentityRepositoryError};
use tasklist::task::ports::TaskRepository;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removal_deletes_identity_and_its_tasks(stores: Stores) {
    let alice = register(&stores, "alice").await;
    let bob = register(&stores, "bob").await;
    stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");
    stores
        .tasks
        .create_task(&new_task(&bob, "walk dog"))
        .await
        .expect("task creation should succeed");

    let report = stores
        .removal
        .remove_account(&alice)
        .await
        .expect("removal should succeed");

    assert_eq!(report.tasks_removed, 1);
    let found = stores
        .identities
        .find_identity(&alice)
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
    assert!(stores.tasks.list_tasks(&alice).await.expect("list should succeed").is_empty());
    assert_eq!(stores.tasks.list_tasks(&bob).await.expect("list should succeed").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recreated_identity_starts_with_no_tasks(stores: Stores) {
    let alice = register(&stores, "alice").await;
    stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");
    stores
        .removal
        .remove_account(&alice)
        .await
        .expect("removal should succeed");

    stores
        .identities
        .create_identity(&new_identity("alice"))
        .await
        .expect("re-registration should succeed");

    assert!(stores.tasks.list_tasks(&alice).await.expect("list should succeed").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_unknown_account_is_not_found(stores: Stores) {
    let result = stores.removal.remove_account(&username("ghost")).await;
    assert!(matches!(result, Err(IdentityRepositoryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identity_with_tasks_cannot_be_deleted_directly(stores: Stores) {
    let alice = register(&stores, "alice").await;
    stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");

    let result = stores.identities.delete_identity(&alice).await;

    assert!(matches!(result, Err(IdentityRepositoryError::OwnsTasks(_))));
    assert!(
        stores
            .identities
            .find_identity(&alice)
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}
