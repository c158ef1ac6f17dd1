//! Diesel row models for identity persistence.

use crate::storage::schema::identities;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for the public columns of an identity.
///
/// The password hash column is deliberately absent, so listings and
/// profile lookups cannot select it.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = identities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IdentitySummaryRow {
    /// Surrogate identity key.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for identity records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = identities)]
pub struct NewIdentityRow {
    /// Unique login name.
    pub username: String,
    /// PHC-format password hash.
    pub password_hash: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
