//! Route definitions for scheduled releases.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::releases;
use crate::state::AppState;

/// Release routes mounted at `/releases`.
///
/// ```text
/// GET    /      -> list_releases (filterable via query params)
/// POST   /      -> create_release
/// PUT    /{id}  -> update_release
/// DELETE /{id}  -> delete_release
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(releases::list_releases).post(releases::create_release))
        .route(
            "/{id}",
            put(releases::update_release).delete(releases::delete_release),
        )
}
