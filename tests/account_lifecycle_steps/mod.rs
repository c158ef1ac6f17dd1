//! Step definitions for account lifecycle scenarios.

mod given;
mod then;
