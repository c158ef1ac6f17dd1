//! In-memory tests for credential storage and lookup.

use super::helpers::{Stores, new_identity, register, stores, username};
use tasklist::identity::{
    domain::PasswordHash,
    ports::{IdentityRepository, IdentityRepositoryError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identities_receive_increasing_ids(stores: Stores) {
    let first = stores
        .identities
        .create_identity(&new_identity("alice"))
        .await
        .expect("identity creation should succeed");
    let second = stores
        .identities
        .create_identity(&new_identity("bob"))
        .await
        .expect("identity creation should succeed");

    assert!(second.id() > first.id());
    let listed = stores
        .identities
        .list_identities()
        .await
        .expect("listing should succeed");
    let names: Vec<&str> = listed.iter().map(|s| s.username().as_str()).collect();
    assert_eq!(names, ["alice", "bob"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_conflicts(stores: Stores) {
    register(&stores, "alice").await;

    let result = stores
        .identities
        .create_identity(&new_identity("alice"))
        .await;

    assert!(matches!(result, Err(IdentityRepositoryError::Conflict(ref name)) if name.as_str() == "alice"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_username_has_no_hash(stores: Stores) {
    let hash = stores
        .identities
        .get_password_hash(&username("nobody"))
        .await
        .expect("lookup should succeed");
    assert!(hash.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_password_replaces_the_stored_hash(stores: Stores) {
    let alice = register(&stores, "alice").await;
    let replacement = PasswordHash::from_stored("$argon2id$replacement");

    stores
        .identities
        .update_password(&alice, &replacement)
        .await
        .expect("update should succeed");

    let stored = stores
        .identities
        .get_password_hash(&alice)
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, Some(replacement));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_password_of_missing_identity_is_not_found(stores: Stores) {
    let result = stores
        .identities
        .update_password(&username("ghost"), &PasswordHash::from_stored("x"))
        .await;
    assert!(matches!(result, Err(IdentityRepositoryError::NotFound(_))));
}
