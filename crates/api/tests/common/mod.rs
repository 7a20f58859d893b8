#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use relplan_api::config::ServerConfig;
use relplan_api::router::build_app_router;
use relplan_api::state::AppState;
use relplan_notify::{EmailConfig, Mailer};
use relplan_store::Store;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
    }
}

async fn build_app(data_dir: &Path, mailer: Option<Arc<Mailer>>) -> Router {
    let store = Store::new(data_dir);
    store.init().await.expect("init store");

    let config = test_config(data_dir);
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
        mailer,
    };

    build_app_router(state, &config)
}

/// Full application over a fresh temp data directory, no mailer.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub async fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let app = build_app(dir.path(), None).await;
    (dir, app)
}

/// Like [`test_app`] but with a mailer pointed at an unreachable relay.
/// Useful for exercising validation paths, which run before any
/// connection attempt.
pub async fn test_app_with_mailer() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mailer = Mailer::new(EmailConfig {
        smtp_host: "smtp.invalid".to_string(),
        smtp_port: 25,
        from_address: "noreply@example.com".to_string(),
        from_name: "Release Planning".to_string(),
        smtp_user: None,
        smtp_password: None,
        max_recipients: 5,
        allowed_domains: vec!["example.com".to_string()],
    });
    let app = build_app(dir.path(), Some(Arc::new(mailer))).await;
    (dir, app)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

pub async fn get(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("build request");
    send(app, request).await
}

pub async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(app, request).await
}

pub async fn put_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(app, request).await
}

pub async fn delete(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .body(Body::empty())
        .expect("build request");
    send(app, request).await
}

/// Create an account and return its JSON representation.
pub async fn seed_account(app: &Router, name: &str, region: &str) -> serde_json::Value {
    let (status, body) = post_json(
        app,
        "/accounts",
        serde_json::json!({ "name": name, "region": region }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seed account: {body}");
    body["data"].clone()
}

/// Create a release version and return its JSON representation.
pub async fn seed_version(app: &Router, name: &str) -> serde_json::Value {
    let (status, body) = post_json(app, "/releaseVersions", serde_json::json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "seed version: {body}");
    body["data"].clone()
}

/// Minimal valid release payload against a seeded account and version.
pub fn release_payload(account: &str, version: &str, date: &str) -> serde_json::Value {
    serde_json::json!({
        "account_name": account,
        "release_version": version,
        "product": "Monitoring",
        "environment": "Production",
        "release_date": date,
        "executor": "ops",
    })
}
