//! Entry document and static asset handlers.
//!
//! The root path serves the entry document directly. Every path no other
//! route matched lands in [`fallback`]: a file under the asset root is served
//! as-is, anything else gets the entry document so the client-side router can
//! take over. Fallback responses carry the entry document as the body while
//! the status stays 404.

use std::io;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::config::CACHE_CONTROL_INDEX;
use crate::error::AppError;
use crate::state::AppState;

/// Serve the entry document at the root path.
#[instrument(name = "spa::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    serve_index(&state, StatusCode::OK).await
}

/// Serve a static asset, or the entry document for client-routed paths.
#[instrument(name = "spa::fallback", skip(state))]
pub async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    if let Some((content, mime)) = state.assets.read(uri.path()).await {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content,
        )
            .into_response();
    }

    // No matching asset: client-routed path. Entry document body, 404 status.
    serve_index(&state, StatusCode::NOT_FOUND).await
}

/// Read the entry document and wrap it in a response with the given status.
///
/// An absent document is a plain 404; an unreadable one surfaces as an
/// internal error.
async fn serve_index(state: &AppState, status: StatusCode) -> Response {
    match state.assets.read_index().await {
        Ok(content) => entry_document(status, content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => AppError::NotFound.into_response(),
        Err(e) => AppError::Io(e).into_response(),
    }
}

/// Build an entry document response; clients revalidate it on each navigation.
fn entry_document(status: StatusCode, content: Vec<u8>) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/html"),
            (header::CACHE_CONTROL, CACHE_CONTROL_INDEX),
        ],
        content,
    )
        .into_response()
}
