//! Configuration module for VDRIVE.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, VdriveError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/vdrive.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Blob storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for uploaded file blobs (sub-directory per owner).
    #[serde(default = "default_files_path")]
    pub files_path: String,
    /// Base directory for published page blobs.
    #[serde(default = "default_pages_path")]
    pub pages_path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
    /// Content types accepted by the upload endpoint.
    #[serde(default = "default_allowed_types")]
    pub allowed_content_types: Vec<String>,
}

fn default_files_path() -> String {
    "data/files".to_string()
}

fn default_pages_path() -> String {
    "data/pages".to_string()
}

fn default_max_upload_size() -> u64 {
    10
}

fn default_allowed_types() -> Vec<String> {
    [
        "text/plain",
        "text/html",
        "text/csv",
        "application/pdf",
        "image/png",
        "image/jpeg",
        "image/gif",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            files_path: default_files_path(),
            pages_path: default_pages_path(),
            max_upload_size_mb: default_max_upload_size(),
            allowed_content_types: default_allowed_types(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// JWT secret key (must be set for production).
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token expiry in seconds.
    #[serde(default = "default_jwt_access_expiry")]
    pub jwt_access_token_expiry_secs: u64,
    /// Refresh token expiry in days.
    #[serde(default = "default_jwt_refresh_expiry")]
    pub jwt_refresh_token_expiry_days: u64,
}

fn default_jwt_access_expiry() -> u64 {
    900 // 15 minutes
}

fn default_jwt_refresh_expiry() -> u64 {
    7
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            jwt_secret: String::new(),
            jwt_access_token_expiry_secs: default_jwt_access_expiry(),
            jwt_refresh_token_expiry_days: default_jwt_refresh_expiry(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/vdrive.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Blob storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VdriveError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VdriveError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `VDRIVE_JWT_SECRET`: Override the JWT secret key
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("VDRIVE_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.web.jwt_secret = jwt_secret;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "data/vdrive.db");
        assert_eq!(config.storage.max_upload_size_mb, 10);
        assert!(config
            .storage
            .allowed_content_types
            .contains(&"text/html".to_string()));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse(
            r#"
            [server]
            port = 9000

            [storage]
            files_path = "/tmp/blobs"
            allowed_content_types = ["text/plain"]
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.files_path, "/tmp/blobs");
        assert_eq!(config.storage.allowed_content_types, vec!["text/plain"]);
        // Untouched sections fall back to defaults
        assert_eq!(config.web.jwt_access_token_expiry_secs, 900);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not toml [");
        assert!(matches!(result, Err(VdriveError::Config(_))));
    }

    #[test]
    fn test_env_override_jwt_secret() {
        let mut config = Config::default();
        std::env::set_var("VDRIVE_JWT_SECRET", "env-secret");
        config.apply_env_overrides();
        std::env::remove_var("VDRIVE_JWT_SECRET");
        assert_eq!(config.web.jwt_secret, "env-secret");
    }
}
