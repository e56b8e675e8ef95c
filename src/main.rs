//! Foyer: a static asset server for single-page applications.
//!
//! This is the application entry point. It parses command line arguments,
//! loads configuration from an optional TOML file and the environment,
//! initializes tracing, sets up the Axum router, and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foyer::config::{AppConfig, DEFAULT_LOG_FILTER};
use foyer::http::start_server;
use foyer::routes::create_router;
use foyer::state::AppState;

/// Foyer: a static asset server for single-page applications
#[derive(Parser, Debug)]
#[command(name = "foyer", version, about)]
struct Args {
    /// Path to configuration file (environment variables take precedence)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "foyer=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration. A missing asset root is fatal here, before the
    // listener ever binds.
    let config = AppConfig::load(args.config.as_deref())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        asset_root = %config.assets.root,
        host = %config.http.host,
        port = config.http.port,
        "Loaded configuration"
    );

    // Create application state and router
    let state = AppState::new(config);
    let app = create_router(state.clone());

    // Start server; blocks until shutdown
    start_server(app, &state.config).await?;

    Ok(())
}
