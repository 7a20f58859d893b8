use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relplan_core::error::CoreError;
use relplan_notify::DeliveryError;
use relplan_store::{RepoError, StoreError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `relplan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from the record store.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// An email delivery error from `relplan_notify`.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Email delivery was requested but no mailer is configured.
    #[error("Email delivery is not configured (SMTP_HOST is not set)")]
    EmailNotConfigured,

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Core(e) => Self::Core(e),
            RepoError::Store(e) => Self::Storage(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::DuplicateName(msg) => {
                    (StatusCode::BAD_REQUEST, "DUPLICATE_NAME", msg.clone())
                }
                CoreError::InUse(msg) => (StatusCode::BAD_REQUEST, "IN_USE", msg.clone()),
            },

            // --- Persistence errors ---
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to persist data".to_string(),
                )
            }

            // --- Email delivery errors ---
            AppError::Delivery(delivery) => match delivery {
                DeliveryError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "EMAIL_VALIDATION",
                    format!("Email validation failed: {msg}"),
                ),
                DeliveryError::Address(err) => (
                    StatusCode::BAD_REQUEST,
                    "EMAIL_VALIDATION",
                    format!("Email address parse error: {err}"),
                ),
                DeliveryError::Transport(err) => {
                    tracing::error!(error = %err, "SMTP transport error");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "DELIVERY_FAILED",
                        "Failed to send email".to_string(),
                    )
                }
                DeliveryError::Build(msg) => {
                    tracing::error!(error = %msg, "Email build error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "Failed to assemble email".to_string(),
                    )
                }
            },

            AppError::EmailNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "EMAIL_NOT_CONFIGURED",
                self.to_string(),
            ),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
