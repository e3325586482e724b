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
    pub backend: BackendConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Rental backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL every REST path is appended to (e.g. "http://localhost:8080/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent as `Authorization` when set
    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// HTTP server configuration for `rentify-api`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl ApiConfig {
    /// Socket address string to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json"
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
            dirs::config_dir().map(|p| p.join("rentify").join("config.toml")),
            Some(PathBuf::from("/etc/rentify/config.toml")),
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

    /// Load an explicit file when given, otherwise search the default locations
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Backend overrides
        if let Ok(url) = std::env::var("RENTIFY_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(token) = std::env::var("RENTIFY_AUTH_TOKEN") {
            self.backend.auth_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Ok(timeout) = std::env::var("RENTIFY_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.backend.request_timeout_ms = ms;
            }
        }

        // API overrides
        if let Ok(host) = std::env::var("RENTIFY_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("RENTIFY_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("RENTIFY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("RENTIFY_LOG_FORMAT") {
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Rentify Configuration
#
# Environment variables override these settings:
# - RENTIFY_BACKEND_URL
# - RENTIFY_AUTH_TOKEN
# - RENTIFY_REQUEST_TIMEOUT_MS
# - RENTIFY_API_HOST
# - RENTIFY_API_PORT
# - RENTIFY_LOG_LEVEL
# - RENTIFY_LOG_FORMAT

[backend]
# Rental backend REST base URL
base_url = "http://localhost:8080/api"

# Bearer token for admin endpoints (/users, /bookings, /payments/all)
# auth_token = ""

# Per-request timeout in milliseconds
request_timeout_ms = 10000

[api]
# rentify-api bind host
host = "0.0.0.0"

# rentify-api port
port = 8083

# Allowed CORS origins
cors_origins = ["http://localhost:5173", "http://127.0.0.1:5173"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8080/api");
        assert_eq!(config.backend.request_timeout_ms, 10_000);
        assert!(config.backend.auth_token.is_none());
        assert_eq!(config.api.addr(), "0.0.0.0:8083");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8083);
        assert_eq!(config.backend.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.cors_origins.len(), 2);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nbase_url = \"https://rentals.example/api\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.base_url, "https://rentals.example/api");
        assert_eq!(config.backend.request_timeout_ms, 10_000);
        assert_eq!(config.api.port, 8083);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = \"not a number\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
