//! Configuration module for chirp.
//!
//! Configuration is read from an optional `config.toml` and then overridden
//! by environment variables, which are the canonical source in deployment:
//! `DATABASE_URL`, `JWT_SECRET`, `APP_ENV`, `HOST`, `PORT`.

use serde::Deserialize;
use std::path::Path;

use crate::{ChirpError, Result};

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: relaxed cookie transport, verbose error bodies.
    #[default]
    Development,
    /// Production: Secure cookies, generic error bodies.
    Production,
}

impl Environment {
    /// Parse from an environment variable value. Anything that is not
    /// "production" is treated as development.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// Whether this is a production deployment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins (with credentials).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL for the account store.
    #[serde(default = "default_db_url")]
    pub url: String,
}

fn default_db_url() -> String {
    "sqlite:data/chirp.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// JWT signing secret (must be set; empty is a fatal misconfiguration).
    #[serde(default)]
    pub jwt_secret: String,
}

/// Image store collaborator configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MediaConfig {
    /// Upload endpoint for profile images. When unset, profile image
    /// updates are rejected as an upstream failure.
    #[serde(default)]
    pub upload_url: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Image store settings.
    #[serde(default)]
    pub media: MediaConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// A missing file is not an error; defaults plus the environment are used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| ChirpError::Config(format!("failed to parse {path:?}: {e}")))?
        } else {
            Config::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(env) = std::env::var("APP_ENV") {
            self.environment = Environment::parse(&env);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(url) = std::env::var("IMAGE_UPLOAD_URL") {
            self.media.upload_url = Some(url);
        }
    }

    /// Validate the configuration.
    ///
    /// A missing signing secret is a fatal startup condition, not a
    /// per-request error.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ChirpError::Config(
                "JWT_SECRET is not set; refusing to start without a signing secret".to_string(),
            ));
        }
        if self.database.url.is_empty() {
            return Err(ChirpError::Config("DATABASE_URL is empty".to_string()));
        }
        Ok(())
    }
}
