//! Adapter implementations for identity ports.
//!
//! - [`hashing`]: Argon2id password hasher
//! - [`memory`]: In-memory repository and account removal for tests
//! - [`sqlite`]: Diesel-backed repository and account removal

pub mod hashing;
pub mod memory;
pub mod sqlite;
