//! Startup migration for legacy release records.
//!
//! Releases written before completion tracking existed lack the
//! `completion_date` family of fields. This backfill runs once at startup,
//! on the raw JSON so untyped legacy records survive the pass, and is
//! idempotent: a second run finds nothing to do.

use serde_json::{json, Value};

use crate::store::{Store, StoreError, RELEASES};

/// Backfill completion fields on releases that predate them.
///
/// A record is legacy iff it has no `completion_date` key. Returns the
/// number of records migrated; saves only when at least one changed.
pub async fn migrate_releases(store: &Store) -> Result<usize, StoreError> {
    let mut releases: Vec<Value> = store.load(RELEASES).await;

    let mut migrated = 0;
    for release in &mut releases {
        let Some(record) = release.as_object_mut() else {
            continue;
        };
        if record.contains_key("completion_date") {
            continue;
        }

        record.insert("completion_date".to_string(), Value::Null);
        record.insert("time_taken_hours".to_string(), Value::Null);
        record.insert("defects_raised".to_string(), json!("0"));
        record
            .entry("defect_details".to_string())
            .or_insert_with(|| json!(""));
        record.insert("completion_notes".to_string(), json!(""));
        record.insert("defects".to_string(), json!([]));
        migrated += 1;
    }

    if migrated > 0 {
        store.save(RELEASES, &releases).await?;
        tracing::info!(migrated, "backfilled completion fields on legacy releases");
    }
    Ok(migrated)
}
