//! Runs password hashing on the blocking thread pool.

use crate::identity::domain::{Password, PasswordHash};
use crate::identity::ports::{HashingError, PasswordHasher};
use std::sync::Arc;

pub(super) async fn hash_off_thread<H>(
    hasher: &Arc<H>,
    password: Password,
) -> Result<PasswordHash, HashingError>
where
    H: PasswordHasher + 'static,
{
    let worker = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || worker.hash(&password))
        .await
        .map_err(HashingError::new)?
}

/// A panicked or cancelled verification counts as a mismatch.
pub(super) async fn verify_off_thread<H>(
    hasher: &Arc<H>,
    password: Password,
    hash: PasswordHash,
) -> bool
where
    H: PasswordHasher + 'static,
{
    let worker = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || worker.verify(&password, &hash))
        .await
        .unwrap_or(false)
}
