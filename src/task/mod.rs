//! Owner-scoped task management for Tasklist.
//!
//! Every task is bound to the username of an existing identity. Reads and
//! writes always carry that owner, and updates and deletes match on task id
//! and owner together, so one user can neither see nor touch another user's
//! tasks. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
