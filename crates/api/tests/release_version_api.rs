mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_with_features_assigns_feature_ids() {
    let (_dir, app) = common::test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/releaseVersions",
        json!({
            "name": "r25.09",
            "description": "September drop",
            "features": [
                { "name": "Dark mode", "description": "UI theme" },
                { "id": 7, "name": "Audit log" },
            ],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "R25.09");
    let features = body["data"]["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    // Client-supplied ids are kept; missing ones are assigned.
    assert!(features[0]["id"].as_i64().unwrap() > 0);
    assert_eq!(features[1]["id"], 7);
}

#[tokio::test]
async fn list_is_sorted_by_name() {
    let (_dir, app) = common::test_app().await;
    common::seed_version(&app, "R25.12").await;
    common::seed_version(&app, "R25.03").await;

    let (status, body) = common::get(&app, "/releaseVersions").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["R25.03", "R25.12"]);
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let (_dir, app) = common::test_app().await;
    common::seed_version(&app, "R25.09").await;

    let (status, body) =
        common::post_json(&app, "/releaseVersions", json!({ "name": "r25.09" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_NAME");
}

#[tokio::test]
async fn update_missing_id_returns_404() {
    let (_dir, app) = common::test_app().await;

    let (status, body) =
        common::put_json(&app, "/releaseVersions/42", json!({ "name": "R26.01" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_referenced_version_returns_400() {
    let (_dir, app) = common::test_app().await;
    common::seed_account(&app, "ACME", "EMEA").await;
    let version = common::seed_version(&app, "R25.09").await;

    let (status, _) = common::post_json(
        &app,
        "/releases",
        common::release_payload("ACME", "R25.09", "2025-09-01"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        common::delete(&app, &format!("/releaseVersions/{}", version["id"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "IN_USE");
}

#[tokio::test]
async fn delete_unreferenced_version_returns_204() {
    let (_dir, app) = common::test_app().await;
    let version = common::seed_version(&app, "R25.09").await;

    let (status, _) =
        common::delete(&app, &format!("/releaseVersions/{}", version["id"])).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
