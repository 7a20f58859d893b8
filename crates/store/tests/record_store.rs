//! Integration tests for the Record Store primitive: initialization,
//! round-trip persistence, and fail-soft reads.

use relplan_store::store::{Store, ACCOUNTS, RELEASES, RELEASE_VERSIONS};
use serde_json::json;

fn temp_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = Store::new(dir.path());
    (dir, store)
}

#[tokio::test]
async fn init_creates_empty_collections() {
    let (_dir, store) = temp_store();
    store.init().await.expect("init");

    for collection in [ACCOUNTS, RELEASE_VERSIONS, RELEASES] {
        let path = store.data_dir().join(format!("{collection}.json"));
        let raw = tokio::fs::read_to_string(&path).await.expect("file exists");
        assert_eq!(raw.trim(), "[]");
    }
}

#[tokio::test]
async fn init_preserves_existing_data() {
    let (_dir, store) = temp_store();
    store.init().await.expect("init");
    store
        .save(ACCOUNTS, &[json!({"id": 1, "name": "ACME"})])
        .await
        .expect("save");

    // A second init must not reset populated collections.
    store.init().await.expect("re-init");
    let records: Vec<serde_json::Value> = store.load(ACCOUNTS).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "ACME");
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let (_dir, store) = temp_store();
    store.init().await.expect("init");

    let records = vec![
        json!({"id": 1, "name": "A", "nested": {"x": [1, 2, 3]}}),
        json!({"id": 2, "name": "B", "value": null}),
    ];
    store.save(RELEASES, &records).await.expect("save");

    let loaded: Vec<serde_json::Value> = store.load(RELEASES).await;
    assert_eq!(loaded, records);
}

#[tokio::test]
async fn load_missing_collection_returns_empty() {
    let (_dir, store) = temp_store();
    // No init: file does not exist.
    let records: Vec<serde_json::Value> = store.load(ACCOUNTS).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn load_invalid_json_returns_empty() {
    let (_dir, store) = temp_store();
    store.init().await.expect("init");

    let path = store.data_dir().join(format!("{ACCOUNTS}.json"));
    tokio::fs::write(&path, b"{ not json").await.expect("write");

    let records: Vec<serde_json::Value> = store.load(ACCOUNTS).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn save_replaces_whole_collection() {
    let (_dir, store) = temp_store();
    store.init().await.expect("init");

    store
        .save(ACCOUNTS, &[json!({"id": 1}), json!({"id": 2})])
        .await
        .expect("first save");
    store
        .save(ACCOUNTS, &[json!({"id": 3})])
        .await
        .expect("second save");

    let records: Vec<serde_json::Value> = store.load(ACCOUNTS).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 3);
}
