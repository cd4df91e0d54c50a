//! Configuration module for inkpost.
//!
//! Settings come from a TOML file where every field has a default, and a few
//! environment variables override the file.

use serde::Deserialize;
use std::path::Path;

use crate::{InkpostError, Result};

/// HTTP server configuration.
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

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/inkpost.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file. Console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Session lifetime in seconds. Also the cookie `Max-Age`.
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_secs: u64,
}

/// Longest accepted session lifetime: ten years.
pub const MAX_JWT_EXPIRATION_SECS: u64 = 10 * 365 * 24 * 60 * 60;

fn default_jwt_expiration() -> u64 {
    3600 // 1 hour
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiration_secs: default_jwt_expiration(),
        }
    }
}

/// Web layer configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    /// CORS allowed origins. Empty means permissive development mode.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Session token configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Web layer configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(InkpostError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| InkpostError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `JWT_SECRET`: session token signing secret
    /// - `JWT_EXPIRATION_TIME`: session lifetime in seconds
    /// - `DATABASE_PATH`: SQLite database file
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(secret) = non_empty_env("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(expiration) = non_empty_env("JWT_EXPIRATION_TIME") {
            self.auth.jwt_expiration_secs = expiration.trim().parse().map_err(|_| {
                InkpostError::Config(format!(
                    "JWT_EXPIRATION_TIME must be a number of seconds, got {expiration:?}"
                ))
            })?;
        }
        if let Some(path) = non_empty_env("DATABASE_PATH") {
            self.database.path = path;
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the JWT secret is empty or the session expiration
    /// is zero or above [`MAX_JWT_EXPIRATION_SECS`].
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(InkpostError::Validation(
                "jwt_secret is not set. \
                 Set it in config.toml or via the JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.auth.jwt_expiration_secs == 0 {
            return Err(InkpostError::Validation(
                "jwt_expiration_secs must be greater than zero".to_string(),
            ));
        }
        if self.auth.jwt_expiration_secs > MAX_JWT_EXPIRATION_SECS {
            return Err(InkpostError::Validation(format!(
                "jwt_expiration_secs must be at most {MAX_JWT_EXPIRATION_SECS}"
            )));
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
