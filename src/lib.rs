//! Foyer: a static asset server for single-page applications.
//!
//! Serves a pre-built front-end from an asset root directory. The root path
//! returns the entry document, `/health` is a liveness probe, and every other
//! path is either a static asset or falls back to the entry document so the
//! client-side router can handle navigation.

pub mod assets;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
