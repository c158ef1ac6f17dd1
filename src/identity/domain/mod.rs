//! Domain model for identities and credentials.
//!
//! Raw request input is turned into validated values here before any store
//! access happens.

mod credentials;
mod error;
mod identity;
mod ids;
mod password;

pub use credentials::ClaimedCredentials;
pub use error::IdentityDomainError;
pub use identity::{IdentitySummary, NewIdentity};
pub use ids::{IdentityId, Username};
pub use password::{Password, PasswordHash};
