//! Route definitions for the release version catalog.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::release_versions;
use crate::state::AppState;

/// Release version routes mounted at `/releaseVersions`.
///
/// ```text
/// GET    /      -> list_release_versions
/// POST   /      -> create_release_version
/// PUT    /{id}  -> update_release_version
/// DELETE /{id}  -> delete_release_version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(release_versions::list_release_versions)
                .post(release_versions::create_release_version),
        )
        .route(
            "/{id}",
            put(release_versions::update_release_version)
                .delete(release_versions::delete_release_version),
        )
}
