//! SMTP configuration loaded from the environment.

/// Default SMTP port (plain relay).
const DEFAULT_SMTP_PORT: u16 = 25;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@relplan.local";

/// Default sender display name when `SMTP_FROM_NAME` is not set.
const DEFAULT_FROM_NAME: &str = "Release Planning";

/// Default cap on TO + CC + BCC recipients per message.
const DEFAULT_MAX_RECIPIENTS: usize = 50;

/// Configuration for the SMTP delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 25).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Display name for the "From" mailbox.
    pub from_name: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Maximum total recipients (TO + CC + BCC) per message.
    pub max_recipients: usize,
    /// Domains recipients may belong to. Empty means any domain.
    pub allowed_domains: Vec<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable               | Required | Default                  |
    /// |------------------------|----------|--------------------------|
    /// | `SMTP_HOST`            | yes      | —                        |
    /// | `SMTP_PORT`            | no       | `25`                     |
    /// | `SMTP_FROM`            | no       | `noreply@relplan.local`  |
    /// | `SMTP_FROM_NAME`       | no       | `Release Planning`       |
    /// | `SMTP_USER`            | no       | —                        |
    /// | `SMTP_PASSWORD`        | no       | —                        |
    /// | `SMTP_MAX_RECIPIENTS`  | no       | `50`                     |
    /// | `SMTP_ALLOWED_DOMAINS` | no       | empty (any domain)       |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            from_name: std::env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| DEFAULT_FROM_NAME.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            max_recipients: std::env::var("SMTP_MAX_RECIPIENTS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_MAX_RECIPIENTS),
            allowed_domains: std::env::var("SMTP_ALLOWED_DOMAINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|d| d.trim().to_ascii_lowercase())
                        .filter(|d| !d.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        // Ensure SMTP_HOST is not set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }
}
