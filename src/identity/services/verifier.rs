//! Per-request credential verification.

use super::blocking::{hash_off_thread, verify_off_thread};
use crate::identity::{
    domain::{ClaimedCredentials, Password, PasswordHash, Username},
    ports::{IdentityRepository, PasswordHasher},
};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Authentication failure.
///
/// Unknown usernames and wrong passwords share one variant and one message,
/// so a caller cannot probe which usernames exist.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The request omitted the username or the password.
    #[error("missing authentication credentials")]
    MissingCredentials,
    /// The credentials did not match a stored identity.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Plaintext behind the hash that unknown usernames are checked against.
const DECOY_PASSWORD: &str = "tasklist-decoy-password";

/// Turns claimed credentials into a verified [`Username`].
///
/// The verifier keeps no session state; every request is checked against
/// the store afresh. An unknown username still costs one hash verification,
/// against a decoy hash computed on first use, so response timing does not
/// reveal which usernames exist.
pub struct IdentityVerifier<R, H>
where
    R: IdentityRepository,
    H: PasswordHasher + 'static,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    decoy: Arc<OnceLock<PasswordHash>>,
}

impl<R, H> Clone for IdentityVerifier<R, H>
where
    R: IdentityRepository,
    H: PasswordHasher + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: Arc::clone(&self.hasher),
            decoy: Arc::clone(&self.decoy),
        }
    }
}

impl<R, H> IdentityVerifier<R, H>
where
    R: IdentityRepository,
    H: PasswordHasher + 'static,
{
    /// Creates a verifier over the given store and hasher.
    #[must_use]
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            decoy: Arc::new(OnceLock::new()),
        }
    }

    /// Verifies the claimed credentials.
    ///
    /// A store failure during lookup is logged and reported as
    /// [`AuthError::InvalidCredentials`]; it is never surfaced to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] when either part is absent
    /// or blank, without touching the store, and
    /// [`AuthError::InvalidCredentials`] otherwise on any failure.
    pub async fn verify_request(
        &self,
        claimed: &ClaimedCredentials,
    ) -> Result<Username, AuthError> {
        let (Some(raw_username), Some(raw_password)) = (claimed.username(), claimed.password())
        else {
            return Err(AuthError::MissingCredentials);
        };
        let username = Username::new(raw_username).map_err(|_| AuthError::MissingCredentials)?;
        let password = Password::new(raw_password).map_err(|_| AuthError::MissingCredentials)?;

        let stored = match self.repository.get_password_hash(&username).await {
            Ok(Some(hash)) => hash,
            Ok(None) => {
                self.verify_against_decoy(password).await;
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                tracing::warn!(username = %username, error = %err, "credential lookup failed");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if verify_off_thread(&self.hasher, password, stored).await {
            Ok(username)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn verify_against_decoy(&self, password: Password) {
        let decoy = match self.decoy.get() {
            Some(hash) => hash.clone(),
            None => {
                let Ok(seed) = Password::new(DECOY_PASSWORD) else {
                    return;
                };
                match hash_off_thread(&self.hasher, seed).await {
                    Ok(hash) => self.decoy.get_or_init(|| hash).clone(),
                    Err(err) => {
                        tracing::warn!(error = %err, "decoy hash unavailable");
                        return;
                    }
                }
            }
        };
        // The outcome is irrelevant; the username is already known to be absent.
        verify_off_thread(&self.hasher, password, decoy).await;
    }
}
