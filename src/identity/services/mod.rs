//! Application services for credential verification and account lifecycle.

mod account;
mod blocking;
mod verifier;

pub use account::{AccountError, AccountResult, AccountService, RegisterAccountRequest};
pub use verifier::{AuthError, IdentityVerifier};
