//! Write-time rules for a single release record.
//!
//! Two concerns live here: keeping the derived defect projections in sync
//! with the embedded defect list, and validating completion data before a
//! release is accepted as Completed. Both run on every create and update.

use crate::error::CoreError;
use crate::model::{Defect, Release, ReleaseStatus};

/// Semicolon-joined `"{defect_id}: {description}"` display projection.
pub fn defect_details(defects: &[Defect]) -> String {
    defects
        .iter()
        .map(|d| format!("{}: {}", d.defect_id, d.description))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Recompute `defects_raised` and `defect_details` from the defect list.
///
/// These fields are derived projections kept for backward-compatible
/// display; whatever the client sent for them is overwritten.
pub fn sync_derived_fields(release: &mut Release) {
    release.defects_raised = release.defects.len().to_string();
    release.defect_details = defect_details(&release.defects);
}

/// Validate a release before it is persisted.
///
/// Only the Completed status carries extra requirements: a completion
/// date, a reported (non-negative) effort, and fully filled-in defect
/// entries. Every other status passes unconditionally -- there is no
/// transition graph.
pub fn validate(release: &Release) -> Result<(), CoreError> {
    if release.status != ReleaseStatus::Completed {
        return Ok(());
    }

    if release.completion_date.is_none() {
        return Err(CoreError::Validation(
            "completion_date is required when status is Completed".to_string(),
        ));
    }

    match &release.time_taken_hours {
        None => {
            return Err(CoreError::Validation(
                "time_taken_hours is required when status is Completed".to_string(),
            ));
        }
        Some(hours) => {
            if let Some(h) = hours.as_hours() {
                if h < 0.0 {
                    return Err(CoreError::Validation(
                        "time_taken_hours must be non-negative".to_string(),
                    ));
                }
            }
        }
    }

    for defect in &release.defects {
        if defect.defect_id.trim().is_empty() || defect.description.trim().is_empty() {
            return Err(CoreError::Validation(
                "every defect on a Completed release needs a defect_id and a description"
                    .to_string(),
            ));
        }
    }

    Ok(())
}
