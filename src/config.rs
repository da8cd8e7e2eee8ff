//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::upstream::{ClientConfig, DEFAULT_BASE_URL};
use crate::view::{RenderOptions, DEFAULT_TOP_N};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream statistics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// 0 keeps cached responses for the life of the process
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            cache_enabled: default_cache_enabled(),
            cache_ttl_secs: 0,
        }
    }
}

impl UpstreamConfig {
    /// Settings for [`crate::upstream::UpstreamClient`]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
            cache_enabled: self.cache_enabled,
            cache_ttl: (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs)),
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
    8085
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

/// Dashboard rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl DashboardConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { top_n: self.top_n }
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
            dirs::config_dir().map(|p| p.join("covid-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/covid-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Upstream overrides
        if let Ok(url) = std::env::var("COVID_DASHBOARD_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Some(secs) = env_parse("COVID_DASHBOARD_TIMEOUT_SECS") {
            self.upstream.request_timeout_secs = secs;
        }
        if let Ok(enabled) = std::env::var("COVID_DASHBOARD_CACHE_ENABLED") {
            self.upstream.cache_enabled = enabled.to_lowercase() != "false" && enabled != "0";
        }

        // API overrides
        if let Ok(host) = std::env::var("COVID_DASHBOARD_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = env_parse("COVID_DASHBOARD_API_PORT") {
            self.api.port = port;
        }

        // Dashboard overrides
        if let Some(n) = env_parse("COVID_DASHBOARD_TOP_N") {
            self.dashboard.top_n = n;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("COVID_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("COVID_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# COVID-19 Dashboard Configuration
#
# Environment variables override these settings:
# - COVID_DASHBOARD_UPSTREAM_URL
# - COVID_DASHBOARD_TIMEOUT_SECS
# - COVID_DASHBOARD_CACHE_ENABLED
# - COVID_DASHBOARD_API_HOST
# - COVID_DASHBOARD_API_PORT
# - COVID_DASHBOARD_TOP_N
# - COVID_DASHBOARD_LOG_LEVEL
# - COVID_DASHBOARD_LOG_FORMAT

[upstream]
# Statistics API base URL
base_url = "https://disease.sh"

# Request timeout in seconds
request_timeout_secs = 30

# Reuse the last good response per endpoint
cache_enabled = true

# Cache lifetime in seconds (0 = until restart)
cache_ttl_secs = 0

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8085

[dashboard]
# Countries shown in the bar charts
top_n = 10

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
