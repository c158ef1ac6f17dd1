//! Busy-timeout classification tests.

use super::helpers::{new_task, open_stores, register};
use diesel::connection::SimpleConnection;
use rstest::rstest;
use tasklist::task::ports::{TaskRepository, TaskRepositoryError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn write_blocked_past_busy_timeout_is_transient() {
    let stores = open_stores(100);
    let alice = register(&stores, "alice").await;
    let mut holder = stores.pool.get().expect("pooled connection");
    holder
        .batch_execute("BEGIN IMMEDIATE")
        .expect("write lock should be acquired");

    let result = stores.tasks.create_task(&new_task(&alice, "blocked")).await;

    holder.batch_execute("ROLLBACK").expect("rollback should succeed");
    let Err(err) = result else {
        panic!("write should not succeed while another writer holds the lock");
    };
    assert!(matches!(err, TaskRepositoryError::Contention(_)), "got {err:?}");
    assert!(err.is_transient());
}
