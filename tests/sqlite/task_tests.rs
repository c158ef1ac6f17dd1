//! `SQLite` tests for owner-scoped task persistence.

use super::helpers::{SqliteStores, count_rows, new_task, register, stores, username};
use mockable::DefaultClock;
use rstest::rstest;
use tasklist::task::{
    domain::{TaskId, TaskTitle, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError},
};

fn update(title: &str, completed: bool) -> TaskUpdate {
    TaskUpdate::new(TaskTitle::new(title).expect("valid title"), completed, &DefaultClock)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_gets_an_id_and_the_verified_owner(stores: SqliteStores) {
    let alice = register(&stores, "alice").await;

    let created = stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");

    assert_eq!(created.id().value(), 1);
    assert_eq!(created.owner(), &alice);
    assert_eq!(created.title().as_str(), "buy milk");
    assert!(!created.completed());
    assert_eq!(created.created_at(), created.updated_at());
    let listed = stores.tasks.list_tasks(&alice).await.expect("list should succeed");
    assert_eq!(listed, vec![created]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_filtered_by_owner_and_ordered_by_id(stores: SqliteStores) {
    let alice = register(&stores, "alice").await;
    let bob = register(&stores, "bob").await;
    for (owner, title) in [(&alice, "a1"), (&bob, "b1"), (&alice, "a2")] {
        stores
            .tasks
            .create_task(&new_task(owner, title))
            .await
            .expect("task creation should succeed");
    }

    let alice_tasks = stores.tasks.list_tasks(&alice).await.expect("list should succeed");
    let nobody = stores
        .tasks
        .list_tasks(&username("nobody"))
        .await
        .expect("list should succeed");

    let titles: Vec<&str> = alice_tasks.iter().map(|t| t.title().as_str()).collect();
    assert_eq!(titles, ["a1", "a2"]);
    assert!(alice_tasks.windows(2).all(|pair| match pair {
        [first, second] => first.id() < second.id(),
        _ => false,
    }));
    assert!(nobody.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_owner_is_rejected_and_nothing_is_written(stores: SqliteStores) {
    let result = stores
        .tasks
        .create_task(&new_task(&username("ghost"), "haunt"))
        .await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::UnknownOwner(ref owner)) if owner.as_str() == "ghost"
    ));
    assert_eq!(count_rows(&stores, "tasks", "1 = 1"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_matches_id_and_owner(stores: SqliteStores) {
    let alice = register(&stores, "alice").await;
    let bob = register(&stores, "bob").await;
    let milk = stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");

    let as_bob = stores
        .tasks
        .update_task(milk.id(), &bob, &update("hijacked", true))
        .await;
    let as_alice = stores
        .tasks
        .update_task(milk.id(), &alice, &update("buy oat milk", true))
        .await
        .expect("owner update should succeed");

    assert!(matches!(as_bob, Err(TaskRepositoryError::NotFound(id)) if id == milk.id()));
    assert_eq!(as_alice.id(), milk.id());
    assert_eq!(as_alice.owner(), &alice);
    assert_eq!(as_alice.title().as_str(), "buy oat milk");
    assert!(as_alice.completed());
    assert_eq!(as_alice.created_at(), milk.created_at());
    assert!(as_alice.updated_at() >= milk.updated_at());
    assert_eq!(count_rows(&stores, "tasks", "title = 'hijacked'"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_matches_id_and_owner(stores: SqliteStores) {
    let alice = register(&stores, "alice").await;
    let bob = register(&stores, "bob").await;
    let milk = stores
        .tasks
        .create_task(&new_task(&alice, "buy milk"))
        .await
        .expect("task creation should succeed");

    let as_bob = stores.tasks.delete_task(milk.id(), &bob).await;
    assert!(matches!(as_bob, Err(TaskRepositoryError::NotFound(_))));
    assert_eq!(count_rows(&stores, "tasks", "owner = 'alice'"), 1);

    stores
        .tasks
        .delete_task(milk.id(), &alice)
        .await
        .expect("owner delete should succeed");
    let repeated = stores.tasks.delete_task(milk.id(), &alice).await;
    assert!(matches!(repeated, Err(TaskRepositoryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_id_is_not_found(stores: SqliteStores) {
    let alice = register(&stores, "alice").await;
    let missing = TaskId::new(99).expect("valid id");

    let result = stores
        .tasks
        .update_task(missing, &alice, &update("anything", false))
        .await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_all_for_owner_counts_removed_rows(stores: SqliteStores) {
    let alice = register(&stores, "alice").await;
    let bob = register(&stores, "bob").await;
    for owner in [&alice, &alice, &bob] {
        stores
            .tasks
            .create_task(&new_task(owner, "chore"))
            .await
            .expect("task creation should succeed");
    }

    let removed = stores
        .tasks
        .delete_all_for_owner(&alice)
        .await
        .expect("bulk delete should succeed");
    let none_left = stores
        .tasks
        .delete_all_for_owner(&alice)
        .await
        .expect("bulk delete should succeed");

    assert_eq!(removed, 2);
    assert_eq!(none_left, 0);
    assert_eq!(count_rows(&stores, "tasks", "owner = 'bob'"), 1);
}
