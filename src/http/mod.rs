//! HTTP server startup and lifecycle.
//!
//! Binds the listener, serves the router, and drains connections on
//! SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
