//! Recipient parsing and validation.
//!
//! Request payloads may carry recipients either as a single delimited
//! string or as a list of addresses. Addresses are checked for basic
//! shape and, when a domain allow-list is configured, for an allowed
//! domain. Validation collects every problem rather than stopping at
//! the first.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

/// A recipient field as it arrives on the wire: one delimited string or
/// a list of addresses.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecipientInput {
    One(String),
    Many(Vec<String>),
}

impl RecipientInput {
    /// Flatten into individual trimmed addresses. Strings are split on
    /// commas, semicolons, and newlines; empty fragments are dropped.
    pub fn parse(&self) -> Vec<String> {
        match self {
            Self::One(raw) => raw
                .split([',', ';', '\n'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Self::Many(list) => list.iter().map(|s| s.trim().to_string()).collect(),
        }
    }
}

/// Flatten an optional recipient field, treating absence as empty.
pub fn parse_optional(input: Option<&RecipientInput>) -> Vec<String> {
    input.map(RecipientInput::parse).unwrap_or_default()
}

fn address_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

/// Validate a batch of addresses against the shape check and the domain
/// allow-list. Returns the valid addresses and a message per rejected
/// one.
pub fn validate_addresses(
    addresses: &[String],
    allowed_domains: &[String],
) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut errors = Vec::new();

    for address in addresses {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            errors.push("Empty email address found".to_string());
            continue;
        }
        if !address_shape().is_match(trimmed) {
            errors.push(format!("Invalid email format: {trimmed}"));
            continue;
        }
        if !allowed_domains.is_empty() {
            // Shape check guarantees exactly the one '@' we split on.
            let domain = trimmed
                .rsplit('@')
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            if !allowed_domains.contains(&domain) {
                errors.push(format!("Domain not allowed: {domain} ({trimmed})"));
                continue;
            }
        }
        valid.push(trimmed.to_string());
    }

    (valid, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(raw: &str) -> RecipientInput {
        RecipientInput::One(raw.to_string())
    }

    #[test]
    fn string_input_splits_on_all_delimiters() {
        let parsed = input("a@x.com, b@x.com; c@x.com\nd@x.com").parse();
        assert_eq!(parsed, vec!["a@x.com", "b@x.com", "c@x.com", "d@x.com"]);
    }

    #[test]
    fn string_input_drops_empty_fragments() {
        let parsed = input("a@x.com,, ;\n b@x.com ").parse();
        assert_eq!(parsed, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn list_input_is_trimmed_verbatim() {
        let parsed = RecipientInput::Many(vec![" a@x.com ".into(), "b@x.com".into()]).parse();
        assert_eq!(parsed, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn absent_input_is_empty() {
        assert!(parse_optional(None).is_empty());
    }

    #[test]
    fn shape_check_rejects_malformed_addresses() {
        let addresses = vec![
            "good@example.com".to_string(),
            "no-at-sign".to_string(),
            "two@@example.com".to_string(),
            "no-dot@example".to_string(),
            "spaces in@example.com".to_string(),
        ];
        let (valid, errors) = validate_addresses(&addresses, &[]);
        assert_eq!(valid, vec!["good@example.com"]);
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("no-at-sign"));
    }

    #[test]
    fn domain_allow_list_is_case_insensitive() {
        let allowed = vec!["example.com".to_string()];
        let addresses = vec![
            "ok@Example.COM".to_string(),
            "bad@other.com".to_string(),
        ];
        let (valid, errors) = validate_addresses(&addresses, &allowed);
        assert_eq!(valid, vec!["ok@Example.COM"]);
        assert_eq!(errors, vec!["Domain not allowed: other.com (bad@other.com)"]);
    }

    #[test]
    fn empty_allow_list_accepts_any_domain() {
        let addresses = vec!["anyone@anywhere.io".to_string()];
        let (valid, errors) = validate_addresses(&addresses, &[]);
        assert_eq!(valid.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn all_errors_are_collected() {
        let addresses = vec![
            " ".to_string(),
            "bad".to_string(),
            "also@bad".to_string(),
        ];
        let (valid, errors) = validate_addresses(&addresses, &[]);
        assert!(valid.is_empty());
        assert_eq!(errors.len(), 3);
    }
}
