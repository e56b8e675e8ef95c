//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is
//! running. Used by Kubernetes, ECS, systemd, and load balancers to verify
//! the service is alive. It never touches the asset root: a missing entry
//! document is a 404 concern, not a liveness one.

use axum::Json;
use serde_json::{json, Value};

/// Health check handler.
///
/// Returns `{"status": "ok"}` to indicate the service is running. This is a
/// liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
