//! Handlers for outbound email.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use relplan_notify::recipients::{parse_optional, RecipientInput};
use relplan_notify::{Mailer, OutgoingEmail, ReleaseEmailData};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request payload for `POST /send-email`.
///
/// `to`, `subject`, and `body` are required; the rest is optional.
/// Recipient fields accept a single delimited string or a list.
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub to: Option<RecipientInput>,
    pub cc: Option<RecipientInput>,
    pub bcc: Option<RecipientInput>,
    pub subject: Option<String>,
    pub body: Option<String>,
    /// Stamped into the `X-Release-ID` header. Accepts a number or string.
    #[serde(rename = "releaseId")]
    pub release_id: Option<serde_json::Value>,
    /// Render the release notification template instead of the free-form
    /// body. Only honoured when `releaseData` is also supplied.
    #[serde(rename = "useTemplate", default)]
    pub use_template: bool,
    #[serde(rename = "releaseData")]
    pub release_data: Option<ReleaseEmailData>,
}

/// Request payload for `POST /email/test`.
#[derive(Debug, Deserialize)]
pub struct TestEmailRequest {
    pub to: Option<RecipientInput>,
    pub cc: Option<RecipientInput>,
    pub bcc: Option<RecipientInput>,
}

fn mailer(state: &AppState) -> Result<&Mailer, AppError> {
    state
        .mailer
        .as_deref()
        .ok_or(AppError::EmailNotConfigured)
}

fn release_id_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// POST /send-email
///
/// Send a notification email. With `useTemplate` and `releaseData`, the
/// release notification template is rendered; otherwise the free-form
/// body is sent as-is.
pub async fn send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> AppResult<impl IntoResponse> {
    let mailer = mailer(&state)?;

    let (Some(to), Some(subject), Some(body)) = (&request.to, request.subject, request.body)
    else {
        return Err(AppError::BadRequest(
            "Missing required email fields: to, subject, body".to_string(),
        ));
    };

    let to = to.parse();
    if to.is_empty() {
        return Err(AppError::BadRequest(
            "At least one TO recipient is required".to_string(),
        ));
    }

    let email = OutgoingEmail {
        to,
        cc: parse_optional(request.cc.as_ref()),
        bcc: parse_optional(request.bcc.as_ref()),
        subject,
        body,
        release_id: request.release_id.map(release_id_string),
        release: if request.use_template {
            request.release_data
        } else {
            None
        },
    };

    let receipt = mailer.send(email).await?;

    Ok(Json(DataResponse { data: receipt }))
}

/// POST /email/test
///
/// Send a test email summarizing the recipient breakdown and the active
/// SMTP settings.
pub async fn send_test_email(
    State(state): State<AppState>,
    Json(request): Json<TestEmailRequest>,
) -> AppResult<impl IntoResponse> {
    let mailer = mailer(&state)?;

    let Some(to) = &request.to else {
        return Err(AppError::BadRequest(
            "TO recipient email address(es) required".to_string(),
        ));
    };
    let to = to.parse();
    let cc = parse_optional(request.cc.as_ref());
    let bcc = parse_optional(request.bcc.as_ref());

    let config = mailer.config();
    let allowed_domains = if config.allowed_domains.is_empty() {
        "any".to_string()
    } else {
        config.allowed_domains.join(", ")
    };
    let body = format!(
        "This is a test email from the release planning system.\n\
         \n\
         If you received this email, the email configuration is working correctly.\n\
         \n\
         Recipient Information:\n\
         =====================\n\
         - TO Recipients: {}\n\
         - CC Recipients: {}\n\
         - BCC Recipients: {}\n\
         \n\
         Email Settings:\n\
         ===============\n\
         - SMTP Server: {}:{}\n\
         - From: {} <{}>\n\
         - Maximum Recipients: {}\n\
         - Allowed Domains: {}\n\
         \n\
         Best regards,\n\
         Release Planning System",
        to.len(),
        cc.len(),
        bcc.len(),
        config.smtp_host,
        config.smtp_port,
        config.from_name,
        config.from_address,
        config.max_recipients,
        allowed_domains,
    );

    let email = OutgoingEmail {
        to,
        cc,
        bcc,
        subject: "Test Email from Release Planning System".to_string(),
        body,
        release_id: Some("test".to_string()),
        release: None,
    };

    let receipt = mailer.send(email).await?;

    Ok(Json(DataResponse { data: receipt }))
}
