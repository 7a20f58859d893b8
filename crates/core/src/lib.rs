//! Domain model and pure business logic for the release planning tracker.
//!
//! This crate has no I/O: the persistence layer lives in `relplan-store`
//! and the HTTP layer in `relplan-api`. Everything here operates on plain
//! in-memory collections so it can be unit tested without a data directory.

pub mod error;
pub mod lifecycle;
pub mod model;
pub mod query;
pub mod types;
