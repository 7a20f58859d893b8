//! Route definitions for customer accounts.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// Account routes mounted at `/accounts`.
///
/// ```text
/// GET    /      -> list_accounts
/// POST   /      -> create_account
/// PUT    /{id}  -> update_account
/// DELETE /{id}  -> delete_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(accounts::list_accounts).post(accounts::create_account))
        .route(
            "/{id}",
            put(accounts::update_account).delete(accounts::delete_account),
        )
}
