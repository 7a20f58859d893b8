use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A feature shipped as part of a release version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A named release train (e.g. "R25.09") grouping features shipped together.
///
/// Names are stored uppercase and are unique case-insensitively. Releases
/// reference a version by name, so a version cannot be deleted while any
/// release points at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseVersion {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// A feature entry as submitted by the client. Ids are client-generated
/// (timestamp-based); entries without one get a server-assigned id.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureInput {
    #[serde(default)]
    pub id: Option<DbId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Payload for `POST /releaseVersions`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReleaseVersion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<FeatureInput>,
}

/// Payload for `PUT /releaseVersions/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReleaseVersion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<FeatureInput>,
}
