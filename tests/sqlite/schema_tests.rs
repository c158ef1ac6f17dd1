//! Schema bootstrap and engine-level constraint tests.

use super::helpers::{SqliteStores, count_rows, database_config, stores};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use rstest::rstest;
use tasklist::config::DatabaseConfig;
use tasklist::storage::{
    self, StorageError,
    migrations::{DROP_TABLES_SQL, run_migrations},
    schema::identities,
};
use tempfile::TempDir;

#[rstest]
fn migrations_are_idempotent(stores: SqliteStores) {
    stores.execute(
        "INSERT INTO identities (username, password_hash, created_at) \
         VALUES ('alice', 'h', '2026-01-01T00:00:00Z')",
    );

    run_migrations(&stores.pool).expect("second run should succeed");

    assert_eq!(count_rows(&stores, "identities", "username = 'alice'"), 1);
}

#[rstest]
fn dropping_and_reapplying_schema_leaves_empty_tables(stores: SqliteStores) {
    stores.execute(
        "INSERT INTO identities (username, password_hash, created_at) \
         VALUES ('alice', 'h', '2026-01-01T00:00:00Z')",
    );

    stores.execute(DROP_TABLES_SQL);
    run_migrations(&stores.pool).expect("schema should reapply");

    assert_eq!(count_rows(&stores, "identities", "1 = 1"), 0);
    assert_eq!(count_rows(&stores, "tasks", "1 = 1"), 0);
}

#[rstest]
fn reopening_an_existing_file_keeps_data() {
    let dir = TempDir::new().expect("temporary directory");
    let config = database_config(&dir, 5000);
    {
        let pool = storage::open(&config).expect("database opens");
        let mut conn = pool.get().expect("pooled connection");
        conn.batch_execute(
            "INSERT INTO identities (username, password_hash, created_at) \
             VALUES ('alice', 'h', '2026-01-01T00:00:00Z')",
        )
        .expect("insert should succeed");
    }

    let reopened = storage::open(&config).expect("database reopens");
    let mut conn = reopened.get().expect("pooled connection");
    let names: Vec<String> = identities::table
        .select(identities::username)
        .load(&mut *conn)
        .expect("select should succeed");
    assert_eq!(names, vec!["alice".to_owned()]);
}

#[rstest]
#[should_panic(expected = "raw SQL should succeed")]
fn task_without_identity_violates_foreign_key(stores: SqliteStores) {
    stores.execute(
        "INSERT INTO tasks (title, completed, owner, created_at, updated_at) \
         VALUES ('orphan', 0, 'ghost', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
    );
}

#[rstest]
#[should_panic(expected = "raw SQL should succeed")]
fn duplicate_username_violates_unique_constraint(stores: SqliteStores) {
    stores.execute(
        "INSERT INTO identities (username, password_hash, created_at) \
         VALUES ('alice', 'h', '2026-01-01T00:00:00Z'); \
         INSERT INTO identities (username, password_hash, created_at) \
         VALUES ('alice', 'h2', '2026-01-01T00:00:00Z');",
    );
}

#[rstest]
fn in_memory_database_is_usable() {
    let pool = storage::open(&DatabaseConfig::with_url(":memory:")).expect("database opens");
    let mut conn = pool.get().expect("pooled connection");
    conn.batch_execute("SELECT 1 FROM tasks")
        .expect("schema should exist on the single pooled connection");
}

#[rstest]
fn in_memory_database_keeps_data_across_checkouts() {
    let pool = storage::open(&DatabaseConfig::with_url(":memory:")).expect("database opens");
    {
        let mut conn = pool.get().expect("pooled connection");
        conn.batch_execute(
            "INSERT INTO identities (username, password_hash, created_at) \
             VALUES ('alice', 'h', '2026-01-01T00:00:00Z')",
        )
        .expect("insert should succeed");
    }

    let mut conn = pool.get().expect("pooled connection");
    let names: Vec<String> = identities::table
        .select(identities::username)
        .load(&mut *conn)
        .expect("select should succeed");
    assert_eq!(names, vec!["alice".to_owned()]);
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_url_is_rejected(#[case] url: &str) {
    let result = storage::open(&DatabaseConfig::with_url(url));
    assert!(matches!(result, Err(StorageError::InvalidConfig(_))));
}
