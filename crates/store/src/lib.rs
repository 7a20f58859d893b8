//! JSON-file persistence for the release planning tracker.
//!
//! Each collection is a single pretty-printed JSON array on disk; every
//! operation is read-all, mutate in memory, write-all. There is no locking
//! and no index -- acceptable at the target scale of hundreds of records
//! with one writer at a time.

pub mod migrate;
pub mod repositories;
pub mod store;

pub use migrate::migrate_releases;
pub use repositories::{AccountRepo, ReleaseRepo, ReleaseVersionRepo, RepoError};
pub use store::{Store, StoreError};
