//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! each stored value carries its own salt and cost parameters and stays
//! verifiable after the configured work factor changes.

use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    rand_core::OsRng,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::config::HashingConfig;
use crate::identity::domain::{Password, PasswordHash};
use crate::identity::ports::{HashingError, PasswordHasher};

/// Argon2id password hasher with a configurable work factor.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the parameters are outside the ranges
    /// Argon2 accepts.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashingError> {
        let params =
            Params::new(memory_kib, iterations, parallelism, None).map_err(HashingError::new)?;
        Ok(Self { params })
    }

    /// Creates a hasher from the `[hashing]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the configured parameters are invalid.
    pub fn from_config(config: &HashingConfig) -> Result<Self, HashingError> {
        Self::new(config.memory_kib, config.iterations, config.parallelism)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(HashingError::new)?;
        Ok(PasswordHash::from_stored(hash.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        let parsed: Result<PhcHash<'_>, password_hash::Error> = PhcHash::new(hash.as_str());
        let Ok(parsed_hash) = parsed else {
            return false;
        };
        self.argon2()
            .verify_password(password.expose().as_bytes(), &parsed_hash)
            .is_ok()
    }
}
