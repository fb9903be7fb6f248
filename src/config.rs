//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "CYCLE_WELLNESS_";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cycle: CycleConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cycle calculation defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CycleConfig {
    #[serde(default = "default_cycle_length")]
    pub default_length: u32,

    #[serde(default = "default_typical_min")]
    pub typical_min: u32,

    #[serde(default = "default_typical_max")]
    pub typical_max: u32,
}

fn default_cycle_length() -> u32 {
    28
}

fn default_typical_min() -> u32 {
    21
}

fn default_typical_max() -> u32 {
    45
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            default_length: default_cycle_length(),
            typical_min: default_typical_min(),
            typical_max: default_typical_max(),
        }
    }
}

/// Memory store defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_user_id")]
    pub default_user_id: String,

    /// Entries returned by mood history queries without a limit
    #[serde(default = "default_log_limit")]
    pub default_log_limit: usize,

    /// Most recent entries fed to pattern analysis during a check-in
    #[serde(default = "default_analysis_window")]
    pub analysis_window: usize,
}

fn default_user_id() -> String {
    "cycle_user".to_string()
}

fn default_log_limit() -> usize {
    30
}

fn default_analysis_window() -> usize {
    90
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_user_id: default_user_id(),
            default_log_limit: default_log_limit(),
            analysis_window: default_analysis_window(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
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
            file: None,
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

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
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

    /// Default config file locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("cycle-wellness").join("config.toml")),
            Some(PathBuf::from("/etc/cycle-wellness/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::search_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
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
        self.apply_overrides(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok());
    }

    /// Apply overrides from `lookup`, keyed by variable name without the
    /// prefix. Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(length) = lookup("DEFAULT_CYCLE_LENGTH").and_then(|l| l.parse().ok()) {
            self.cycle.default_length = length;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(file) = lookup("LOG_FILE") {
            self.logging.file = Some(file).filter(|f| !f.is_empty());
        }
    }
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
    r#"# Cycle Wellness Configuration
#
# Environment variables override these settings:
# - CYCLE_WELLNESS_HOST
# - CYCLE_WELLNESS_PORT
# - CYCLE_WELLNESS_DEFAULT_CYCLE_LENGTH
# - CYCLE_WELLNESS_LOG_LEVEL
# - CYCLE_WELLNESS_LOG_FORMAT
# - CYCLE_WELLNESS_LOG_FILE

[server]
# API server host
host = "127.0.0.1"

# API server port
port = 8090

# Allowed CORS origins (empty allows any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[cycle]
# Cycle length used when none is given (days)
default_length = 28

# Lengths outside this range are accepted but logged as atypical
typical_min = 21
typical_max = 45

[store]
# User id used by the CLI when none is given
default_user_id = "cycle_user"

# Mood history entries returned by default
default_log_limit = 30

# Recent mood logs analyzed during a check-in
analysis_window = 90

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/cycle-wellness/cycle-wellness.log"
"#
    .to_string()
}
