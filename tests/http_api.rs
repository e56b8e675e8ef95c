//! Integration tests for the HTTP surface.
//!
//! Each test builds a throwaway asset root, assembles the router, and drives
//! it with tower's `oneshot` - no listener is bound. Tests run in parallel;
//! every test owns its own temp directory.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use foyer::config::AppConfig;
use foyer::routes::create_router;
use foyer::state::AppState;

const INDEX_HTML: &str = "<!DOCTYPE html><html><body>app shell</body></html>";

/// Build a router serving the given directory as its asset root.
fn router_for(root: &std::path::Path) -> Router {
    let mut config = AppConfig::default();
    config.assets.root = root.display().to_string();
    create_router(AppState::new(config))
}

/// An asset root populated with an entry document and a couple of assets.
fn populated_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/app.css"), "body { margin: 0 }").unwrap();
    std::fs::write(dir.path().join("assets/logo.svg"), "<svg></svg>").unwrap();
    dir
}

async fn get(app: &Router, uri: &str) -> (StatusCode, http::HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body.to_vec())
}

fn as_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn health_returns_ok_json() {
    let root = populated_root();
    let app = router_for(root.path());

    let (status, headers, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    assert_eq!(as_json(&body), json!({ "status": "ok" }));
}

#[tokio::test]
async fn health_does_not_depend_on_asset_root() {
    // Empty root, no entry document - the probe still answers.
    let root = TempDir::new().unwrap();
    let app = router_for(root.path());

    let (status, _, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({ "status": "ok" }));
}

#[tokio::test]
async fn root_serves_entry_document() {
    let root = populated_root();
    let app = router_for(root.path());

    let (status, headers, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
    assert_eq!(body, INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn root_without_entry_document_is_json_404() {
    let root = TempDir::new().unwrap();
    let app = router_for(root.path());

    let (status, _, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body), json!({ "error": "not found" }));
}

#[tokio::test]
async fn existing_asset_is_served_verbatim() {
    let root = populated_root();
    let app = router_for(root.path());

    let (status, headers, body) = get(&app, "/assets/app.css").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/css");
    assert_eq!(body, b"body { margin: 0 }");

    let (status, headers, body) = get(&app, "/assets/logo.svg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(body, b"<svg></svg>");
}

#[tokio::test]
async fn entry_document_by_name_is_a_plain_asset() {
    let root = populated_root();
    let app = router_for(root.path());

    let (status, headers, body) = get(&app, "/index.html").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert_eq!(body, INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn unmatched_path_falls_back_to_entry_document_with_404() {
    let root = populated_root();
    let app = router_for(root.path());

    let (status, headers, body) = get(&app, "/settings/profile").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert_eq!(body, INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn unmatched_path_without_entry_document_is_json_404() {
    let root = TempDir::new().unwrap();
    let app = router_for(root.path());

    let (status, _, body) = get(&app, "/settings/profile").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body), json!({ "error": "not found" }));
}

#[tokio::test]
async fn directory_path_falls_back() {
    let root = populated_root();
    let app = router_for(root.path());

    let (status, _, body) = get(&app, "/assets").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn traversal_cannot_escape_asset_root() {
    // Layout: base/build is the root, base/secret.txt sits outside it.
    let base = TempDir::new().unwrap();
    let root = base.path().join("build");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(base.path().join("secret.txt"), "leaked").unwrap();
    let app = router_for(&root);

    for uri in ["/../secret.txt", "/../../etc/passwd", "/a/../../secret.txt"] {
        let (status, _, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {uri}");
        assert_eq!(body, INDEX_HTML.as_bytes(), "uri: {uri}");
    }

    // Percent-encoded dots are not decoded into traversal either.
    let (status, _, body) = get(&app, "/%2e%2e/secret.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_ne!(body, b"leaked");
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_inside_root_cannot_escape() {
    let base = TempDir::new().unwrap();
    let root = base.path().join("build");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(base.path().join("secret.txt"), "leaked").unwrap();
    std::os::unix::fs::symlink(base.path().join("secret.txt"), root.join("link.txt")).unwrap();
    let app = router_for(&root);

    let (status, _, body) = get(&app, "/link.txt").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let root = populated_root();
    let app = router_for(root.path());

    for uri in ["/", "/health", "/assets/app.css", "/no/such/route"] {
        let first = get(&app, uri).await;
        let second = get(&app, uri).await;
        assert_eq!(first.0, second.0, "uri: {uri}");
        assert_eq!(first.2, second.2, "uri: {uri}");
    }
}
