//! Icosa (workspace facade crate).
//!
//! Re-exports the member crates as `icosa::{core,term,types}` and hosts the
//! run configuration shared by the binary and integration tests.

pub mod config;

pub use icosa_core as core;
pub use icosa_term as term;
pub use icosa_types as types;
