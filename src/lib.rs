//! Tasklist: an owner-scoped task list service.
//!
//! Every request carries credentials that are verified against a stored
//! password hash before any task data is touched. Task reads and writes are
//! always filtered by the verified owner, and account removal cascades to the
//! owner's tasks as a single unit.
//!
//! # Architecture
//!
//! Tasklist follows hexagonal architecture principles:
//!
//! - **Domain**: Validated values and aggregates with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for persistence and hashing
//! - **Adapters**: Concrete implementations of ports (`SQLite`, in-memory,
//!   Argon2)
//!
//! # Modules
//!
//! - [`identity`]: Credential storage, password hashing, and request
//!   verification
//! - [`task`]: Owner-scoped task persistence and lifecycle
//! - [`api`]: Transport-agnostic request handlers
//! - [`storage`]: `SQLite` pool, schema bootstrap, and shared in-memory tables
//! - [`config`]: Service configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod config;
pub mod identity;
pub mod storage;
pub mod task;
pub mod telemetry;
