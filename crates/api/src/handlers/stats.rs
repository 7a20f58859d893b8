//! Handlers for aggregated statistics.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use relplan_core::query::{self, DefectFilter};
use relplan_store::{AccountRepo, ReleaseRepo, ReleaseVersionRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /stats
///
/// Dashboard counters over all three collections.
pub async fn summary_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let releases = ReleaseRepo::list(&state.store).await;
    let accounts = AccountRepo::list(&state.store).await;
    let versions = ReleaseVersionRepo::list(&state.store).await;

    let stats = query::summary_stats(&releases, &accounts, &versions, Utc::now().date_naive());

    Ok(Json(DataResponse { data: stats }))
}

/// Payload for `GET /stats/defects`: the metrics plus the flattened,
/// filtered defect list they were computed over.
#[derive(Serialize)]
pub struct DefectStatsResponse {
    pub stats: query::DefectStats,
    pub defects: Vec<query::TaggedDefect>,
}

/// GET /stats/defects
///
/// Defect metrics over Completed releases, plus the flattened defect
/// list. The list honours the query criteria (`account_name`,
/// `release_version`, `severity`, `status`); the metrics always cover
/// every completed release.
pub async fn defect_stats(
    State(state): State<AppState>,
    Query(filter): Query<DefectFilter>,
) -> AppResult<impl IntoResponse> {
    let releases = ReleaseRepo::list(&state.store).await;

    let stats = query::defect_stats(&releases);
    let defects = query::flatten_defects(&releases, &filter);

    Ok(Json(DataResponse {
        data: DefectStatsResponse { stats, defects },
    }))
}
