//! Read-only views and statistics over the release collection.
//!
//! Everything here is pure and recomputed on every call; collections are
//! small (hundreds of records) so no caching or indexing is warranted.
//! Histograms use `BTreeMap` so serialized output is deterministic.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Account, Release, ReleaseStatus, ReleaseVersion};
use crate::types::DbId;

/// Optional equality criteria for listing releases. All supplied, non-empty
/// criteria are ANDed together; omitted or empty criteria impose no
/// constraint. `account_region` joins through the account collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseFilter {
    pub product: Option<String>,
    pub environment: Option<String>,
    pub status: Option<String>,
    pub release_version: Option<String>,
    pub account_region: Option<String>,
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.is_empty())
}

/// Filter releases by the given criteria, preserving input order.
///
/// `release_version` is matched by exact equality (the canonical contract;
/// the substring variant one UI view used is deliberately not replicated).
pub fn filter_releases(
    releases: Vec<Release>,
    accounts: &[Account],
    filter: &ReleaseFilter,
) -> Vec<Release> {
    let region_accounts: Option<HashSet<&str>> = active(&filter.account_region).map(|region| {
        accounts
            .iter()
            .filter(|a| a.region == region)
            .map(|a| a.name.as_str())
            .collect()
    });

    releases
        .into_iter()
        .filter(|r| {
            if let Some(product) = active(&filter.product) {
                if r.product != product {
                    return false;
                }
            }
            if let Some(environment) = active(&filter.environment) {
                if r.environment != environment {
                    return false;
                }
            }
            if let Some(status) = active(&filter.status) {
                if r.status.as_str() != status {
                    return false;
                }
            }
            if let Some(version) = active(&filter.release_version) {
                if r.release_version != version {
                    return false;
                }
            }
            if let Some(names) = &region_accounts {
                if !names.contains(r.account_name.as_str()) {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Aggregate counters for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total_accounts: usize,
    pub total_releases: usize,
    pub total_versions: usize,
    /// Features across all release versions.
    pub total_features: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub release_version_counts: BTreeMap<String, usize>,
    pub region_counts: BTreeMap<String, usize>,
    /// Scheduled releases with a release date of `today` or later.
    pub upcoming_releases: usize,
}

/// Compute the dashboard counters over the three collections.
pub fn summary_stats(
    releases: &[Release],
    accounts: &[Account],
    versions: &[ReleaseVersion],
    today: NaiveDate,
) -> SummaryStats {
    let mut status_counts = BTreeMap::new();
    let mut release_version_counts = BTreeMap::new();
    for release in releases {
        *status_counts
            .entry(release.status.as_str().to_string())
            .or_insert(0) += 1;
        if !release.release_version.is_empty() {
            *release_version_counts
                .entry(release.release_version.clone())
                .or_insert(0) += 1;
        }
    }

    let mut region_counts = BTreeMap::new();
    for account in accounts {
        if !account.region.is_empty() {
            *region_counts.entry(account.region.clone()).or_insert(0) += 1;
        }
    }

    SummaryStats {
        total_accounts: accounts.len(),
        total_releases: releases.len(),
        total_versions: versions.len(),
        total_features: versions.iter().map(|v| v.features.len()).sum(),
        status_counts,
        release_version_counts,
        region_counts,
        upcoming_releases: releases
            .iter()
            .filter(|r| r.status == ReleaseStatus::Scheduled && r.release_date >= today)
            .count(),
    }
}

/// A defect flattened out of its parent release, tagged with the parent's
/// account and version so it can be listed and filtered on its own.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedDefect {
    pub id: DbId,
    pub defect_id: String,
    pub description: String,
    pub severity: String,
    pub status: String,
    pub account_name: String,
    pub release_version: String,
}

/// Optional equality criteria for the flattened defect listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefectFilter {
    pub account_name: Option<String>,
    pub release_version: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
}

/// Flatten the defects of all Completed releases, applying the filter.
pub fn flatten_defects(releases: &[Release], filter: &DefectFilter) -> Vec<TaggedDefect> {
    releases
        .iter()
        .filter(|r| r.status == ReleaseStatus::Completed)
        .flat_map(|release| {
            release.defects.iter().map(|d| TaggedDefect {
                id: d.id,
                defect_id: d.defect_id.clone(),
                description: d.description.clone(),
                severity: d.severity.as_str().to_string(),
                status: d.status.as_str().to_string(),
                account_name: release.account_name.clone(),
                release_version: release.release_version.clone(),
            })
        })
        .filter(|d| {
            active(&filter.account_name).map_or(true, |v| d.account_name == v)
                && active(&filter.release_version).map_or(true, |v| d.release_version == v)
                && active(&filter.severity).map_or(true, |v| d.severity == v)
                && active(&filter.status).map_or(true, |v| d.status == v)
        })
        .collect()
}

/// Defect quality metrics over Completed releases.
#[derive(Debug, Clone, Serialize)]
pub struct DefectStats {
    pub total_defects: usize,
    pub completed_releases: usize,
    /// Defects per completed release, rounded to two decimals; 0 when no
    /// release has completed yet.
    pub defect_rate: f64,
    /// Mean reported effort over completed releases with a numeric
    /// `time_taken_hours`; `None` when no release reported one.
    pub avg_time_taken_hours: Option<f64>,
    pub severity_breakdown: BTreeMap<String, usize>,
    pub status_breakdown: BTreeMap<String, usize>,
    pub account_breakdown: BTreeMap<String, usize>,
}

/// Compute defect metrics. Only Completed releases contribute.
pub fn defect_stats(releases: &[Release]) -> DefectStats {
    let completed: Vec<&Release> = releases
        .iter()
        .filter(|r| r.status == ReleaseStatus::Completed)
        .collect();

    let mut total_defects = 0;
    let mut severity_breakdown = BTreeMap::new();
    let mut status_breakdown = BTreeMap::new();
    let mut account_breakdown = BTreeMap::new();
    for release in &completed {
        for defect in &release.defects {
            total_defects += 1;
            *severity_breakdown
                .entry(defect.severity.as_str().to_string())
                .or_insert(0) += 1;
            *status_breakdown
                .entry(defect.status.as_str().to_string())
                .or_insert(0) += 1;
            *account_breakdown
                .entry(release.account_name.clone())
                .or_insert(0) += 1;
        }
    }

    let defect_rate = if completed.is_empty() {
        0.0
    } else {
        let rate = total_defects as f64 / completed.len() as f64;
        (rate * 100.0).round() / 100.0
    };

    let reported: Vec<f64> = completed
        .iter()
        .filter_map(|r| r.time_taken_hours.as_ref().and_then(|h| h.as_hours()))
        .collect();
    let avg_time_taken_hours = if reported.is_empty() {
        None
    } else {
        Some(reported.iter().sum::<f64>() / reported.len() as f64)
    };

    DefectStats {
        total_defects,
        completed_releases: completed.len(),
        defect_rate,
        avg_time_taken_hours,
        severity_breakdown,
        status_breakdown,
        account_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Defect, DefectSeverity, DefectStatus, HoursTaken};

    fn account(name: &str, region: &str) -> Account {
        Account {
            id: 1,
            name: name.to_string(),
            region: region.to_string(),
            products: vec![],
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    fn release(id: DbId, account: &str, status: ReleaseStatus) -> Release {
        let now = chrono::Utc::now();
        Release {
            id,
            account_name: account.to_string(),
            release_version: "R25.09".to_string(),
            product: "Monitoring".to_string(),
            environment: "Production".to_string(),
            release_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            executor: "ops".to_string(),
            status,
            notes: String::new(),
            completion_date: None,
            time_taken_hours: None,
            defects_raised: "0".to_string(),
            defect_details: String::new(),
            completion_notes: String::new(),
            defects: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn defect(id: DbId, severity: DefectSeverity) -> Defect {
        Defect {
            id,
            defect_id: format!("BUG-{id}"),
            description: "broken".to_string(),
            severity,
            status: DefectStatus::Open,
        }
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let releases = vec![
            release(1, "ACME", ReleaseStatus::Scheduled),
            release(2, "GLOBEX", ReleaseStatus::Blocked),
            release(3, "ACME", ReleaseStatus::Completed),
        ];
        let out = filter_releases(releases.clone(), &[], &ReleaseFilter::default());
        let ids: Vec<DbId> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn empty_string_criterion_imposes_no_constraint() {
        let releases = vec![release(1, "ACME", ReleaseStatus::Scheduled)];
        let filter = ReleaseFilter {
            status: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter_releases(releases, &[], &filter).len(), 1);
    }

    #[test]
    fn status_filter_selects_exact_subset() {
        let releases = vec![
            release(1, "ACME", ReleaseStatus::Blocked),
            release(2, "GLOBEX", ReleaseStatus::Scheduled),
            release(3, "ACME", ReleaseStatus::Blocked),
        ];
        let filter = ReleaseFilter {
            status: Some("Blocked".to_string()),
            ..Default::default()
        };
        let out = filter_releases(releases, &[], &filter);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.status == ReleaseStatus::Blocked));
    }

    #[test]
    fn sequential_filters_equal_conjunction() {
        let mut completed = release(1, "ACME", ReleaseStatus::Completed);
        completed.product = "SRE".to_string();
        let releases = vec![
            completed,
            release(2, "ACME", ReleaseStatus::Completed),
            release(3, "ACME", ReleaseStatus::Scheduled),
        ];

        let by_status = ReleaseFilter {
            status: Some("Completed".to_string()),
            ..Default::default()
        };
        let by_product = ReleaseFilter {
            product: Some("SRE".to_string()),
            ..Default::default()
        };
        let both = ReleaseFilter {
            status: Some("Completed".to_string()),
            product: Some("SRE".to_string()),
            ..Default::default()
        };

        let sequential =
            filter_releases(filter_releases(releases.clone(), &[], &by_status), &[], &by_product);
        let conjunction = filter_releases(releases, &[], &both);
        let seq_ids: Vec<DbId> = sequential.iter().map(|r| r.id).collect();
        let conj_ids: Vec<DbId> = conjunction.iter().map(|r| r.id).collect();
        assert_eq!(seq_ids, conj_ids);
        assert_eq!(seq_ids, vec![1]);
    }

    #[test]
    fn account_region_filter_joins_through_accounts() {
        let accounts = vec![account("ACME", "EMEA"), account("GLOBEX", "APAC")];
        let releases = vec![
            release(1, "ACME", ReleaseStatus::Scheduled),
            release(2, "GLOBEX", ReleaseStatus::Scheduled),
        ];
        let filter = ReleaseFilter {
            account_region: Some("APAC".to_string()),
            ..Default::default()
        };
        let out = filter_releases(releases, &accounts, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].account_name, "GLOBEX");
    }

    #[test]
    fn summary_counts_and_upcoming() {
        let accounts = vec![account("ACME", "EMEA"), account("GLOBEX", "EMEA")];
        let versions: Vec<ReleaseVersion> = vec![];
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();

        let mut past = release(1, "ACME", ReleaseStatus::Scheduled);
        past.release_date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let upcoming = release(2, "GLOBEX", ReleaseStatus::Scheduled);
        let blocked = release(3, "ACME", ReleaseStatus::Blocked);

        let stats = summary_stats(&[past, upcoming, blocked], &accounts, &versions, today);
        assert_eq!(stats.total_accounts, 2);
        assert_eq!(stats.total_releases, 3);
        assert_eq!(stats.status_counts["Scheduled"], 2);
        assert_eq!(stats.status_counts["Blocked"], 1);
        assert_eq!(stats.region_counts["EMEA"], 2);
        assert_eq!(stats.release_version_counts["R25.09"], 3);
        assert_eq!(stats.upcoming_releases, 1);
    }

    #[test]
    fn defect_stats_concrete_scenario() {
        // Three Completed releases with defect counts [2, 0, 1] and
        // reported hours [4, 6, "not set"].
        let mut a = release(1, "ACME", ReleaseStatus::Completed);
        a.defects = vec![
            defect(1, DefectSeverity::High),
            defect(2, DefectSeverity::Low),
        ];
        a.time_taken_hours = Some(HoursTaken::Hours(4.0));

        let mut b = release(2, "GLOBEX", ReleaseStatus::Completed);
        b.time_taken_hours = Some(HoursTaken::Hours(6.0));

        let mut c = release(3, "ACME", ReleaseStatus::Completed);
        c.defects = vec![defect(3, DefectSeverity::High)];
        c.time_taken_hours = Some(HoursTaken::Text("not set".to_string()));

        // A non-completed release with defects must not contribute.
        let mut d = release(4, "ACME", ReleaseStatus::InProgress);
        d.defects = vec![defect(4, DefectSeverity::Critical)];

        let stats = defect_stats(&[a, b, c, d]);
        assert_eq!(stats.total_defects, 3);
        assert_eq!(stats.completed_releases, 3);
        assert_eq!(stats.defect_rate, 1.0);
        assert_eq!(stats.avg_time_taken_hours, Some(5.0));
        assert_eq!(stats.severity_breakdown["High"], 2);
        assert_eq!(stats.severity_breakdown["Low"], 1);
        assert_eq!(stats.account_breakdown["ACME"], 3);
        assert!(stats.severity_breakdown.get("Critical").is_none());
    }

    #[test]
    fn defect_rate_zero_without_completed_releases() {
        let mut r = release(1, "ACME", ReleaseStatus::Scheduled);
        r.defects = vec![defect(1, DefectSeverity::Medium)];
        let stats = defect_stats(&[r]);
        assert_eq!(stats.total_defects, 0);
        assert_eq!(stats.defect_rate, 0.0);
        assert_eq!(stats.avg_time_taken_hours, None);
    }

    #[test]
    fn flatten_tags_defects_with_parent_fields() {
        let mut a = release(1, "ACME", ReleaseStatus::Completed);
        a.defects = vec![defect(1, DefectSeverity::High)];
        let mut b = release(2, "GLOBEX", ReleaseStatus::Completed);
        b.defects = vec![defect(2, DefectSeverity::Low)];

        let all = flatten_defects(&[a.clone(), b.clone()], &DefectFilter::default());
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].account_name, "ACME");
        assert_eq!(all[0].release_version, "R25.09");

        let filter = DefectFilter {
            severity: Some("Low".to_string()),
            ..Default::default()
        };
        let low = flatten_defects(&[a, b], &filter);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].account_name, "GLOBEX");
    }
}
