//! Identity management for Tasklist.
//!
//! Identities are username and password-hash pairs. This module stores them,
//! hashes and verifies passwords, and turns per-request credentials into a
//! verified username, which is the only trust anchor the task layer accepts.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
