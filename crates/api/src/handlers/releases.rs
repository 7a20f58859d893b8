//! Handlers for scheduled releases.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use relplan_core::model::{CreateRelease, UpdateRelease};
use relplan_core::query::{self, ReleaseFilter};
use relplan_core::types::DbId;
use relplan_store::{AccountRepo, ReleaseRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /releases
///
/// List releases matching the query criteria (`product`, `environment`,
/// `status`, `release_version`, `account_region`), most recent release
/// date first.
pub async fn list_releases(
    State(state): State<AppState>,
    Query(filter): Query<ReleaseFilter>,
) -> AppResult<impl IntoResponse> {
    let releases = ReleaseRepo::list(&state.store).await;
    let accounts = AccountRepo::list(&state.store).await;

    let mut releases = query::filter_releases(releases, &accounts, &filter);
    releases.sort_by(|a, b| b.release_date.cmp(&a.release_date).then(b.id.cmp(&a.id)));

    Ok(Json(DataResponse { data: releases }))
}

/// POST /releases
///
/// Schedule a release. The account must exist; a non-empty
/// `release_version` must name an existing version.
pub async fn create_release(
    State(state): State<AppState>,
    Json(input): Json<CreateRelease>,
) -> AppResult<impl IntoResponse> {
    let release = ReleaseRepo::create(&state.store, input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: release })))
}

/// PUT /releases/{id}
///
/// Full-field update. Completion fields are validated against the status
/// and the derived defect fields are recomputed.
pub async fn update_release(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRelease>,
) -> AppResult<impl IntoResponse> {
    let release = ReleaseRepo::update(&state.store, id, input).await?;

    Ok(Json(DataResponse { data: release }))
}

/// DELETE /releases/{id}
pub async fn delete_release(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ReleaseRepo::delete(&state.store, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
