//! Route definitions for aggregated statistics.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Statistics routes mounted at `/stats`.
///
/// ```text
/// GET /          -> summary_stats
/// GET /defects   -> defect_stats (filterable defect list included)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stats::summary_stats))
        .route("/defects", get(stats::defect_stats))
}
