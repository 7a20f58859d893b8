//! Typed CRUD over the Record Store, one repository per entity.
//!
//! Repositories own the uniqueness and referential-integrity rules; the
//! HTTP layer only translates their errors. Every operation follows the
//! same read-all / mutate / write-all pattern.

pub mod account_repo;
pub mod release_repo;
pub mod release_version_repo;

pub use account_repo::AccountRepo;
pub use release_repo::ReleaseRepo;
pub use release_version_repo::ReleaseVersionRepo;

use relplan_core::error::CoreError;
use relplan_core::types::DbId;

use crate::store::StoreError;

/// Error from a repository operation: either a domain rule violation or a
/// persistence failure.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Next id for a collection: `max(existing, 0) + 1`. Freed ranges are
/// never reused.
pub(crate) fn next_id(ids: impl Iterator<Item = DbId>) -> DbId {
    ids.fold(0, DbId::max) + 1
}
