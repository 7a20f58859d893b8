//! Handlers for the release version catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use relplan_core::model::{CreateReleaseVersion, UpdateReleaseVersion};
use relplan_core::types::DbId;
use relplan_store::ReleaseVersionRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /releaseVersions
///
/// List all release versions, sorted by name.
pub async fn list_release_versions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut versions = ReleaseVersionRepo::list(&state.store).await;
    versions.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(DataResponse { data: versions }))
}

/// POST /releaseVersions
///
/// Create a release version. The name is trimmed and uppercased;
/// duplicates are rejected case-insensitively. Features without an id are
/// assigned one.
pub async fn create_release_version(
    State(state): State<AppState>,
    Json(input): Json<CreateReleaseVersion>,
) -> AppResult<impl IntoResponse> {
    let version = ReleaseVersionRepo::create(&state.store, input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: version })))
}

/// PUT /releaseVersions/{id}
pub async fn update_release_version(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReleaseVersion>,
) -> AppResult<impl IntoResponse> {
    let version = ReleaseVersionRepo::update(&state.store, id, input).await?;

    Ok(Json(DataResponse { data: version }))
}

/// DELETE /releaseVersions/{id}
///
/// Rejected with 400 while any release still references the version.
pub async fn delete_release_version(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ReleaseVersionRepo::delete(&state.store, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
