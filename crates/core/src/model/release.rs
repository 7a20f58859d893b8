use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Release status. Closed set; any other value is rejected at the
/// deserialization boundary. There is no enforced transition graph --
/// any status may be set to any other status directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReleaseStatus {
    #[default]
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Blocked,
}

impl ReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Scheduled => "Scheduled",
            ReleaseStatus::InProgress => "In Progress",
            ReleaseStatus::Completed => "Completed",
            ReleaseStatus::Blocked => "Blocked",
        }
    }
}

/// Severity of a defect raised during a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefectSeverity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl DefectSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectSeverity::Low => "Low",
            DefectSeverity::Medium => "Medium",
            DefectSeverity::High => "High",
            DefectSeverity::Critical => "Critical",
        }
    }
}

/// Tracking status of a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefectStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Fixed,
    Closed,
    Rejected,
}

impl DefectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectStatus::Open => "Open",
            DefectStatus::InProgress => "In Progress",
            DefectStatus::Fixed => "Fixed",
            DefectStatus::Closed => "Closed",
            DefectStatus::Rejected => "Rejected",
        }
    }
}

/// A defect embedded in its parent release. Has no independent persistence;
/// the `id` is client-generated (timestamp-based).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defect {
    pub id: DbId,
    #[serde(default)]
    pub defect_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: DefectSeverity,
    #[serde(default)]
    pub status: DefectStatus,
}

/// Reported completion effort. Legacy records store strings like
/// `"not set"` alongside plain numbers, so this is an untagged
/// number-or-string; only values that parse as a number count as
/// reported time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursTaken {
    Hours(f64),
    Text(String),
}

impl HoursTaken {
    /// The numeric value, if one was actually reported.
    pub fn as_hours(&self) -> Option<f64> {
        match self {
            HoursTaken::Hours(h) => Some(*h),
            HoursTaken::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn zero_count() -> String {
    "0".to_string()
}

/// A scheduled or completed deployment of software to one account.
///
/// `account_name` and `release_version` are stored verbatim name
/// references; integrity is enforced at the application layer.
/// `defects_raised` and `defect_details` are derived projections of
/// `defects`, recomputed on every write and never trusted as input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub id: DbId,
    pub account_name: String,
    #[serde(default)]
    pub release_version: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub environment: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub executor: String,
    #[serde(default)]
    pub status: ReleaseStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_taken_hours: Option<HoursTaken>,
    /// Derived: `defects.len()`, stringified.
    #[serde(default = "zero_count")]
    pub defects_raised: String,
    /// Derived: `"{defect_id}: {description}"` joined by `"; "`.
    #[serde(default)]
    pub defect_details: String,
    #[serde(default)]
    pub completion_notes: String,
    #[serde(default)]
    pub defects: Vec<Defect>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for `POST /releases`. Status defaults to Scheduled.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRelease {
    pub account_name: String,
    #[serde(default)]
    pub release_version: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub environment: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub executor: String,
    #[serde(default)]
    pub status: Option<ReleaseStatus>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_taken_hours: Option<HoursTaken>,
    #[serde(default)]
    pub completion_notes: String,
    #[serde(default)]
    pub defects: Vec<Defect>,
}

/// Payload for `PUT /releases/{id}`. A full-record replace of the mutable
/// fields; `id` and `created_at` are preserved.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRelease {
    pub account_name: String,
    #[serde(default)]
    pub release_version: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub environment: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub executor: String,
    pub status: ReleaseStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_taken_hours: Option<HoursTaken>,
    #[serde(default)]
    pub completion_notes: String,
    #[serde(default)]
    pub defects: Vec<Defect>,
}
