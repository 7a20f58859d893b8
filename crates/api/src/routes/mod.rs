pub mod accounts;
pub mod email;
pub mod health;
pub mod release_versions;
pub mod releases;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the root route tree.
///
/// Route hierarchy:
///
/// ```text
/// /releaseVersions            list, create
/// /releaseVersions/{id}       update, delete
///
/// /accounts                   list, create
/// /accounts/{id}              update, delete
///
/// /releases                   list (filterable), create
/// /releases/{id}              update, delete
///
/// /stats                      dashboard counters
/// /stats/defects              defect metrics + flattened defect list
///
/// /send-email                 release notification email (POST)
/// /email/test                 test email (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/releaseVersions", release_versions::router())
        .nest("/accounts", accounts::router())
        .nest("/releases", releases::router())
        .nest("/stats", stats::router())
        .merge(email::router())
}
