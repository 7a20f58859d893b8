use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A customer/tenant a release is performed for.
///
/// Names are stored uppercase and are unique case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub region: String,
    /// Products in use at the account (e.g. "Monitoring", "SRE").
    #[serde(default)]
    pub products: Vec<String>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Payload for `POST /accounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccount {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub products: Vec<String>,
}

/// Payload for `PUT /accounts/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccount {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub products: Vec<String>,
}
