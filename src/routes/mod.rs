//! HTTP route handlers.
//!
//! Three routes cover the whole surface: the entry document at the root, the
//! liveness probe, and a fallback that serves static assets or hands
//! client-routed paths back to the entry document. The fallback is an
//! ordinary routing rule, not an error hook.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod health;
pub mod spa;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .route("/", get(spa::index))
        .merge(health_routes)
        // Anything else: a static asset if one matches, the entry document if not
        .fallback(spa::fallback)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
