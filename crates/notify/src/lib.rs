//! SMTP notification delivery for release events.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be
//! constructed.

pub mod config;
pub mod mailer;
pub mod recipients;
pub mod template;

pub use config::EmailConfig;
pub use mailer::{DeliveryError, EmailReceipt, Mailer, OutgoingEmail};
pub use template::ReleaseEmailData;
