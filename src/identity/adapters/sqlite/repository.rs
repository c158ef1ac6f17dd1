//! `SQLite` repository implementation for identity storage.

use super::models::{IdentitySummaryRow, NewIdentityRow};
use crate::identity::{
    domain::{IdentityId, IdentitySummary, NewIdentity, PasswordHash, Username},
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult},
};
use crate::storage::{
    SqlitePool,
    blocking::{get_conn_with, run_blocking_with},
    schema::identities,
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;

/// `SQLite`-backed identity repository.
#[derive(Debug, Clone)]
pub struct SqliteIdentityRepository {
    pool: SqlitePool,
}

impl SqliteIdentityRepository {
    /// Creates a new repository from a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> IdentityRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> IdentityRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, IdentityRepositoryError::contention)?;
                f(&mut connection)
            },
            IdentityRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl IdentityRepository for SqliteIdentityRepository {
    async fn create_identity(
        &self,
        identity: &NewIdentity,
    ) -> IdentityRepositoryResult<IdentitySummary> {
        let username = identity.username.clone();
        let new_row = NewIdentityRow {
            username: identity.username.as_str().to_owned(),
            password_hash: identity.password_hash.as_str().to_owned(),
            created_at: identity.created_at,
        };

        let row = self
            .run_blocking(move |connection| {
                connection.immediate_transaction(|tx| {
                    // The unique constraint stays authoritative if a racing
                    // insert slips past this check.
                    let taken: i64 = identities::table
                        .filter(identities::username.eq(username.as_str()))
                        .count()
                        .get_result(tx)?;
                    if taken > 0 {
                        return Err(IdentityRepositoryError::Conflict(username.clone()));
                    }

                    diesel::insert_into(identities::table)
                        .values(&new_row)
                        .returning(IdentitySummaryRow::as_returning())
                        .get_result::<IdentitySummaryRow>(tx)
                        .map_err(|err| match err {
                            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                                IdentityRepositoryError::Conflict(username.clone())
                            }
                            other => IdentityRepositoryError::from(other),
                        })
                })
            })
            .await?;
        tracing::debug!(username = %row.username, id = row.id, "identity inserted");
        row_to_summary(row)
    }

    async fn get_password_hash(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<PasswordHash>> {
        let lookup = username.clone();
        self.run_blocking(move |connection| {
            let stored = identities::table
                .filter(identities::username.eq(lookup.as_str()))
                .select(identities::password_hash)
                .first::<String>(connection)
                .optional()?;
            Ok(stored.map(PasswordHash::from_stored))
        })
        .await
    }

    async fn find_identity(
        &self,
        username: &Username,
    ) -> IdentityRepositoryResult<Option<IdentitySummary>> {
        let lookup = username.clone();
        self.run_blocking(move |connection| {
            let row = identities::table
                .filter(identities::username.eq(lookup.as_str()))
                .select(IdentitySummaryRow::as_select())
                .first::<IdentitySummaryRow>(connection)
                .optional()?;
            row.map(row_to_summary).transpose()
        })
        .await
    }

    async fn update_password(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> IdentityRepositoryResult<()> {
        let target = username.clone();
        let new_hash = password_hash.as_str().to_owned();
        self.run_blocking(move |connection| {
            let affected = diesel::update(
                identities::table.filter(identities::username.eq(target.as_str())),
            )
            .set(identities::password_hash.eq(new_hash))
            .execute(connection)?;
            if affected == 0 {
                return Err(IdentityRepositoryError::NotFound(target));
            }
            Ok(())
        })
        .await
    }

    async fn delete_identity(&self, username: &Username) -> IdentityRepositoryResult<()> {
        let target = username.clone();
        self.run_blocking(move |connection| delete_identity_row(connection, &target))
            .await
    }

    async fn list_identities(&self) -> IdentityRepositoryResult<Vec<IdentitySummary>> {
        self.run_blocking(|connection| {
            let rows = identities::table
                .order(identities::id.asc())
                .select(IdentitySummaryRow::as_select())
                .load::<IdentitySummaryRow>(connection)?;
            rows.into_iter().map(row_to_summary).collect()
        })
        .await
    }
}

/// Deletes the identity row on an open connection.
///
/// The foreign key from `tasks.owner` makes `SQLite` refuse the delete while
/// tasks remain, which is reported as [`IdentityRepositoryError::OwnsTasks`].
pub(crate) fn delete_identity_row(
    connection: &mut SqliteConnection,
    username: &Username,
) -> IdentityRepositoryResult<()> {
    let affected = diesel::delete(
        identities::table.filter(identities::username.eq(username.as_str())),
    )
    .execute(connection)
    .map_err(|err| match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            IdentityRepositoryError::OwnsTasks(username.clone())
        }
        other => IdentityRepositoryError::from(other),
    })?;
    if affected == 0 {
        return Err(IdentityRepositoryError::NotFound(username.clone()));
    }
    Ok(())
}

fn row_to_summary(row: IdentitySummaryRow) -> IdentityRepositoryResult<IdentitySummary> {
    let IdentitySummaryRow {
        id,
        username,
        created_at,
    } = row;
    let identity_id = IdentityId::new(id).map_err(IdentityRepositoryError::persistence)?;
    let name = Username::new(username).map_err(IdentityRepositoryError::persistence)?;
    Ok(IdentitySummary::from_persisted(identity_id, name, created_at))
}
