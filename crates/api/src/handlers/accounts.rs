//! Handlers for customer accounts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use relplan_core::model::{CreateAccount, UpdateAccount};
use relplan_core::types::DbId;
use relplan_store::AccountRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /accounts
///
/// List all accounts, sorted by name.
pub async fn list_accounts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut accounts = AccountRepo::list(&state.store).await;
    accounts.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(DataResponse { data: accounts }))
}

/// POST /accounts
///
/// Create an account. The name is trimmed and uppercased; duplicates are
/// rejected case-insensitively.
pub async fn create_account(
    State(state): State<AppState>,
    Json(input): Json<CreateAccount>,
) -> AppResult<impl IntoResponse> {
    let account = AccountRepo::create(&state.store, input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: account })))
}

/// PUT /accounts/{id}
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccount>,
) -> AppResult<impl IntoResponse> {
    let account = AccountRepo::update(&state.store, id, input).await?;

    Ok(Json(DataResponse { data: account }))
}

/// DELETE /accounts/{id}
///
/// Rejected with 400 while any release still references the account.
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    AccountRepo::delete(&state.store, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
