//! Outgoing message assembly and SMTP delivery.

use chrono::Utc;
use lettre::message::header::{Header, HeaderName, HeaderValue};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Serialize;

use crate::config::EmailConfig;
use crate::recipients::validate_addresses;
use crate::template::{self, ReleaseEmailData};

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// One or more recipient addresses failed validation.
    #[error("Email validation failed: {0}")]
    Validation(String),

    /// SMTP transport-level failure (connection, relay rejection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// A message ready for delivery, recipients already flattened.
#[derive(Debug, Clone, Default)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
    /// Stamped into the `X-Release-ID` header when present.
    pub release_id: Option<String>,
    /// When present, the release notification template is used instead
    /// of the free-form body.
    pub release: Option<ReleaseEmailData>,
}

/// Validated recipients as accepted for a delivery.
#[derive(Debug, Clone, Serialize)]
pub struct RecipientSet {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
}

impl RecipientSet {
    fn total(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }
}

/// Returned to the caller after a successful send.
#[derive(Debug, Clone, Serialize)]
pub struct EmailReceipt {
    pub message_id: String,
    pub recipients: RecipientSet,
    pub recipient_count: usize,
}

#[derive(Debug, Clone)]
struct XReleaseId(String);

impl Header for XReleaseId {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Release-ID")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.to_string()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

#[derive(Debug, Clone)]
struct XMailer(String);

impl Header for XMailer {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Mailer")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.to_string()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

const MAILER_IDENT: &str = "Release Planning System v1.0";

/// Sends release notification emails via SMTP.
pub struct Mailer {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    /// Build a mailer over a plain relay (no TLS), matching the kind of
    /// internal SMTP gateway this talks to. Credentials are attached
    /// when both user and password are configured.
    pub fn new(config: EmailConfig) -> Self {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port);
        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        let transport = builder.build();
        Self { config, transport }
    }

    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Validate recipients, render the body, and send.
    pub async fn send(&self, email: OutgoingEmail) -> Result<EmailReceipt, DeliveryError> {
        let recipients = self.validate_recipients(&email)?;

        let message = self.build_message(&email, &recipients)?;
        let message_id = message
            .headers()
            .get_raw("Message-ID")
            .unwrap_or_default()
            .to_string();

        self.transport.send(message).await?;

        tracing::info!(
            to = recipients.to.len(),
            cc = recipients.cc.len(),
            bcc = recipients.bcc.len(),
            subject = %email.subject,
            template = email.release.is_some(),
            "email sent"
        );

        let recipient_count = recipients.total();
        Ok(EmailReceipt {
            message_id,
            recipients,
            recipient_count,
        })
    }

    fn validate_recipients(&self, email: &OutgoingEmail) -> Result<RecipientSet, DeliveryError> {
        let allowed = &self.config.allowed_domains;
        let (to, mut errors) = validate_addresses(&email.to, allowed);

        let (cc, cc_errors) = validate_addresses(&email.cc, allowed);
        errors.extend(cc_errors.into_iter().map(|e| format!("CC: {e}")));

        let (bcc, bcc_errors) = validate_addresses(&email.bcc, allowed);
        errors.extend(bcc_errors.into_iter().map(|e| format!("BCC: {e}")));

        if !errors.is_empty() {
            return Err(DeliveryError::Validation(errors.join("; ")));
        }

        let recipients = RecipientSet { to, cc, bcc };
        if recipients.to.is_empty() {
            return Err(DeliveryError::Validation(
                "At least one TO recipient is required".to_string(),
            ));
        }
        if recipients.total() > self.config.max_recipients {
            return Err(DeliveryError::Validation(format!(
                "Total recipients ({}) exceeds maximum allowed ({})",
                recipients.total(),
                self.config.max_recipients
            )));
        }
        Ok(recipients)
    }

    fn build_message(
        &self,
        email: &OutgoingEmail,
        recipients: &RecipientSet,
    ) -> Result<Message, DeliveryError> {
        let from_address: Address = self.config.from_address.parse()?;
        let mut builder = Message::builder()
            .from(Mailbox::new(Some(self.config.from_name.clone()), from_address))
            .subject(email.subject.clone())
            .message_id(Some(format!(
                "<{}.{}@{}>",
                Utc::now().timestamp_millis(),
                std::process::id(),
                self.config.smtp_host
            )))
            .header(XReleaseId(
                email.release_id.clone().unwrap_or_else(|| "unknown".to_string()),
            ))
            .header(XMailer(MAILER_IDENT.to_string()));

        for address in &recipients.to {
            builder = builder.to(Mailbox::new(None, address.parse()?));
        }
        for address in &recipients.cc {
            builder = builder.cc(Mailbox::new(None, address.parse()?));
        }
        for address in &recipients.bcc {
            builder = builder.bcc(Mailbox::new(None, address.parse()?));
        }

        let (text, html) = match &email.release {
            Some(release) => (template::release_text(release), template::release_html(release)),
            None => (email.body.clone(), template::simple_html(&email.body)),
        };

        builder
            .multipart(MultiPart::alternative_plain_html(text, html))
            .map_err(|e| DeliveryError::Build(e.to_string()))
    }
}
