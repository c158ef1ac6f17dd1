//! Port contracts for identity management.
//!
//! Ports define infrastructure-agnostic interfaces used by identity services.

pub mod hasher;
pub mod removal;
pub mod repository;

pub use hasher::{HashingError, PasswordHasher};
pub use removal::{AccountRemoval, AccountRemovalReport};
pub use repository::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult};

#[cfg(test)]
pub use hasher::MockPasswordHasher;
#[cfg(test)]
pub use removal::MockAccountRemoval;
#[cfg(test)]
pub use repository::MockIdentityRepository;
