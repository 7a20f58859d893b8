use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every failure a repository or lifecycle check can produce maps onto one
/// of these variants; the API layer translates them into HTTP responses
/// (validation, duplicate-name and in-use are 400-class, not-found is 404).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("{0}")]
    InUse(String),
}
