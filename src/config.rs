//! Configuration loading and constants.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables (`HOST`, `PORT`, `ASSET_ROOT`). The environment
//! wins because deployments of this server are driven through the
//! environment. `AppConfig` is the root configuration struct.

use serde::Deserialize;
use std::path::Path;

/// Default TCP port to bind
pub const DEFAULT_PORT: u16 = 5001;

/// Default bind address (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default asset root directory, as produced by the front-end build
pub const DEFAULT_ASSET_ROOT: &str = "build";

/// Entry document served at the root path and for fallback routes
pub const INDEX_FILE: &str = "index.html";

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "foyer=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Cache-Control for the liveness probe; probe responses must never be cached
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Cache-Control for the entry document; clients revalidate after a redeploy
pub const CACHE_CONTROL_INDEX: &str = "no-cache";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Asset root configuration
    #[serde(default)]
    pub assets: AssetConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }
}

/// Asset root configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Directory containing the built front-end, including the entry document
    #[serde(default = "AssetConfig::default_root")]
    pub root: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
        }
    }
}

impl AssetConfig {
    fn default_root() -> String {
        DEFAULT_ASSET_ROOT.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file, apply environment
    /// overrides, and validate.
    ///
    /// When no path is given, the default path is used if it exists;
    /// otherwise built-in defaults apply. An explicitly given path must be
    /// readable.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        config.apply_overrides(
            std::env::var("HOST").ok(),
            std::env::var("PORT").ok(),
            std::env::var("ASSET_ROOT").ok(),
        )?;
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<String>,
        asset_root: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = host {
            self.http.host = host;
        }
        if let Some(port) = port {
            self.http.port = parse_port(&port)?;
        }
        if let Some(root) = asset_root {
            self.assets.root = root;
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// The asset root must exist and be a directory. The entry document may
    /// legitimately be absent at startup; its absence is a 404 concern at
    /// request time, not a startup one.
    fn validate(&self) -> Result<(), ConfigError> {
        if !Path::new(&self.assets.root).is_dir() {
            return Err(ConfigError::Validation(format!(
                "asset root '{}' does not exist or is not a directory",
                self.assets.root
            )));
        }
        Ok(())
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::Validation(format!("PORT must be an integer in 1-65535, got '{value}'"))
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
