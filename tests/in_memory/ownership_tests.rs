//! In-memory tests for owner-scoped task access.

use super::helpers::{Stores, new_task, register, stores, username};
use tasklist::task::{
    domain::{TaskId, TaskTitle, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::DefaultClock;
use rstest::rstest;

fn update(title: &str, completed: bool) -> TaskUpdate {
    TaskUpdate::new(TaskTitle::new(title).expect("valid title"), completed, &DefaultClock)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_are_listed_only_for_their_owner(stores: Stores) {
    let alice = register(&stores, "alice").await;
    let bob = register(&stores, "bob").await;
    let milk = stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");
    let dog = stores
        .tasks
        .create_task(&new_task(&bob, "walk dog"))
        .await
        .expect("task creation should succeed");

    let alice_tasks = stores.tasks.list_tasks(&alice).await.expect("list should succeed");
    let bob_tasks = stores.tasks.list_tasks(&bob).await.expect("list should succeed");

    assert_eq!(alice_tasks, vec![milk]);
    assert_eq!(bob_tasks, vec![dog]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_task_cannot_be_updated_or_deleted(stores: Stores) {
    let alice = register(&stores, "alice").await;
    let bob = register(&stores, "bob").await;
    let milk = stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");

    let updated = stores
        .tasks
        .update_task(milk.id(), &bob, &update("hijacked", true))
        .await;
    let deleted = stores.tasks.delete_task(milk.id(), &bob).await;

    assert!(matches!(updated, Err(TaskRepositoryError::NotFound(id)) if id == milk.id()));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(_))));
    let unchanged = stores.tasks.list_tasks(&alice).await.expect("list should succeed");
    assert_eq!(unchanged, vec![milk]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_update_applies_new_values(stores: Stores) {
    let alice = register(&stores, "alice").await;
    let milk = stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");

    let updated = stores
        .tasks
        .update_task(milk.id(), &alice, &update("buy oat milk", true))
        .await
        .expect("update should succeed");

    assert_eq!(updated.id(), milk.id());
    assert_eq!(updated.title().as_str(), "buy oat milk");
    assert!(updated.completed());
    assert_eq!(updated.created_at(), milk.created_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_id_is_not_found(stores: Stores) {
    let alice = register(&stores, "alice").await;
    let missing = TaskId::new(404).expect("valid id");

    let result = stores.tasks.delete_task(missing, &alice).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_for_unregistered_owner_is_rejected(stores: Stores) {
    let ghost = username("ghost");

    let result = stores.tasks.create_task(&new_task(&ghost, "haunt")).await;

    assert!(matches!(result, Err(TaskRepositoryError::UnknownOwner(_))));
    let listed = stores.tasks.list_tasks(&ghost).await.expect("list should succeed");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_all_for_owner_leaves_other_owners_alone(stores: Stores) {
    let alice = register(&stores, "alice").await;
    let bob = register(&stores, "bob").await;
    for title in ["a", "b", "c"] {
        stores
            .tasks
            .create_task(&new_task(&alice, title))
            .await
            .expect("task creation should succeed");
    }
    stores
        .tasks
        .create_task(&new_task(&bob, "d"))
        .await
        .expect("task creation should succeed");

    let removed = stores
        .tasks
        .delete_all_for_owner(&alice)
        .await
        .expect("bulk delete should succeed");

    assert_eq!(removed, 3);
    assert_eq!(
        stores.tasks.list_tasks(&bob).await.expect("list should succeed").len(),
        1
    );
}
