//! Route definitions for outbound email.

use axum::routing::post;
use axum::Router;

use crate::handlers::email;
use crate::state::AppState;

/// Email routes mounted at the root.
///
/// ```text
/// POST /send-email  -> send_email
/// POST /email/test  -> send_test_email
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-email", post(email::send_email))
        .route("/email/test", post(email::send_test_email))
}
