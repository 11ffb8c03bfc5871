//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! The valid range and sampling step are read once at startup; nothing
//! changes them while a store is running.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::series::{parse_timestamp, SeriesError, ValidRange, DEFAULT_STEP_MINUTES};
use crate::store::StoreConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub range: RangeConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Valid range and series sampling
#[derive(Debug, Clone, Deserialize)]
pub struct RangeConfig {
    #[serde(default = "default_range_min")]
    pub min: String,

    #[serde(default = "default_range_max")]
    pub max: String,

    #[serde(default = "default_step_minutes")]
    pub step_minutes: i64,
}

fn default_range_min() -> String {
    "2010-05-01 00:00".to_string()
}

fn default_range_max() -> String {
    "2010-05-28 00:00".to_string()
}

fn default_step_minutes() -> i64 {
    DEFAULT_STEP_MINUTES
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: default_range_min(),
            max: default_range_max(),
            step_minutes: default_step_minutes(),
        }
    }
}

/// Initial window selection
#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_from")]
    pub from: String,

    #[serde(default = "default_window_to")]
    pub to: String,
}

fn default_window_from() -> String {
    "2010-05-03 00:00".to_string()
}

fn default_window_to() -> String {
    "2010-05-05 00:00".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            from: default_window_from(),
            to: default_window_to(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("series-window").join("config.toml")),
            Some(PathBuf::from("/etc/series-window/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Range overrides
        if let Ok(min) = std::env::var("SERIES_WINDOW_RANGE_MIN") {
            self.range.min = min;
        }
        if let Ok(max) = std::env::var("SERIES_WINDOW_RANGE_MAX") {
            self.range.max = max;
        }
        if let Ok(step) = std::env::var("SERIES_WINDOW_STEP_MINUTES") {
            if let Ok(s) = step.parse() {
                self.range.step_minutes = s;
            }
        }

        // API overrides
        if let Ok(host) = std::env::var("SERIES_WINDOW_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("SERIES_WINDOW_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("SERIES_WINDOW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SERIES_WINDOW_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Resolve the range and window sections into a validated `StoreConfig`
    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        let range = ValidRange::new(
            parse_timestamp(&self.range.min)?,
            parse_timestamp(&self.range.max)?,
        )?;

        let config = StoreConfig {
            range,
            step_minutes: self.range.step_minutes,
            initial_from: parse_timestamp(&self.window.from)?,
            initial_to: parse_timestamp(&self.window.to)?,
        };
        config.validate()?;

        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] SeriesError),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Series Window Configuration
#
# Environment variables override these settings:
# - SERIES_WINDOW_RANGE_MIN
# - SERIES_WINDOW_RANGE_MAX
# - SERIES_WINDOW_STEP_MINUTES
# - SERIES_WINDOW_API_HOST
# - SERIES_WINDOW_API_PORT
# - SERIES_WINDOW_LOG_LEVEL
# - SERIES_WINDOW_LOG_FORMAT

[range]
# Bounds for both window edges (inclusive), "YYYY-MM-DD" or "YYYY-MM-DD HH:MM"
min = "2010-05-01 00:00"
max = "2010-05-28 00:00"

# Sampling step of the generated series (minutes)
step_minutes = 5

[window]
# Initial window selection
from = "2010-05-03 00:00"
to = "2010-05-05 00:00"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8086

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
