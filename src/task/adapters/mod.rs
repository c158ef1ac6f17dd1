//! Adapter implementations for task ports.
//!
//! - [`memory`]: In-memory repository for tests
//! - [`sqlite`]: Diesel-backed repository

pub mod memory;
pub mod sqlite;
