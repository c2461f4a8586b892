//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub salon: SalonConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client configuration used by forms and loaders
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Origin every resource path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Cookie sent with same-origin requests, if any
    #[serde(default)]
    pub session_cookie: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            session_cookie: None,
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Field validation rules for the customer form
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_true")]
    pub require_last_name: bool,

    #[serde(default = "default_true")]
    pub require_phone_number: bool,

    /// Pattern the phone number must match; unset disables the rule
    #[serde(default = "default_phone_pattern")]
    pub phone_pattern: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_phone_pattern() -> Option<String> {
    Some(r"^[0-9]*$".to_string())
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_last_name: true,
            require_phone_number: true,
            phone_pattern: default_phone_pattern(),
        }
    }
}

/// Salon opening hours and the choices offered by the appointment form
#[derive(Debug, Clone, Deserialize)]
pub struct SalonConfig {
    #[serde(default = "default_opens_at")]
    pub opens_at: u32,

    #[serde(default = "default_closes_at")]
    pub closes_at: u32,

    #[serde(default = "default_services")]
    pub services: Vec<String>,

    #[serde(default = "default_stylists")]
    pub stylists: Vec<String>,
}

fn default_opens_at() -> u32 {
    9
}

fn default_closes_at() -> u32 {
    19
}

fn default_services() -> Vec<String> {
    [
        "Cut",
        "Blow-dry",
        "Cut & color",
        "Beard trim",
        "Cut & beard trim",
        "Extensions",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_stylists() -> Vec<String> {
    ["Ashley", "Jo", "Pat", "Sam"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self {
            opens_at: default_opens_at(),
            closes_at: default_closes_at(),
            services: default_services(),
            stylists: default_stylists(),
        }
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
            dirs::config_dir().map(|p| p.join("appointments").join("config.toml")),
            Some(PathBuf::from("./appointments.toml")),
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

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("APPOINTMENTS_API_URL") {
            self.client.base_url = url;
        }

        if let Ok(host) = std::env::var("APPOINTMENTS_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("APPOINTMENTS_SERVER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(level) = std::env::var("APPOINTMENTS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("APPOINTMENTS_LOG_FORMAT") {
            self.logging.format = format;
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

    #[error("Invalid pattern for {field}: {error}")]
    InvalidPattern { field: &'static str, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Appointments Configuration
#
# Environment variables override these settings:
# - APPOINTMENTS_API_URL
# - APPOINTMENTS_SERVER_HOST
# - APPOINTMENTS_SERVER_PORT
# - APPOINTMENTS_LOG_LEVEL
# - APPOINTMENTS_LOG_FORMAT

[client]
# Origin that /customers, /appointments and /availableTimeSlots live on
base_url = "http://localhost:3000"

# Request timeout in seconds
request_timeout_secs = 30

# Cookie sent with same-origin requests
# session_cookie = "session=..."

[server]
# Development server host
host = "127.0.0.1"

# Development server port
port = 3000

[validation]
# Customer form rules
require_last_name = true
require_phone_number = true
phone_pattern = "^[0-9]*$"

[salon]
# Opening hours (24h clock)
opens_at = 9
closes_at = 19

services = ["Cut", "Blow-dry", "Cut & color", "Beard trim", "Cut & beard trim", "Extensions"]
stylists = ["Ashley", "Jo", "Pat", "Sam"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
