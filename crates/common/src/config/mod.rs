//! Configuration management for arXiv Dash
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - The legacy `POSTGRES_PASSWORD` variable for the database secret
//! - Default values

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_db_user")]
    pub user: String,

    /// The only required secret
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level filter (debug, info, warn, error or a full EnvFilter directive)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name attached to log lines
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8050 }
fn default_db_host() -> String { "postgres".to_string() }
fn default_db_port() -> u16 { 5432 }
fn default_db_name() -> String { "arxiv".to_string() }
fn default_db_user() -> String { "postgres".to_string() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 10 }
fn default_idle_timeout() -> u64 { 300 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_service_name() -> String { "arxivdash".to_string() }

/// Legacy environment variable for the database secret
pub const LEGACY_PASSWORD_VAR: &str = "POSTGRES_PASSWORD";

fn lookup(vars: &Option<Map<String, String>>, key: &str) -> Option<String> {
    match vars {
        Some(map) => map.get(key).cloned(),
        None => std::env::var(key).ok(),
    }
}

fn app_environment(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Load from a specific TOML file, then environment overrides
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::from_file_with(path, None)
    }

    /// `vars` stands in for the process environment when given
    fn load_with(vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let env = lookup(&vars, "APP_ENV").unwrap_or_else(|| "development".to_string());

        let config = Self::builder(&vars)?
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., APP__DATABASE__PASSWORD=secret
            .add_source(app_environment(vars))
            .build()?;

        Self::finish(config)
    }

    fn from_file_with(path: &str, vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let config = Self::builder(&vars)?
            .add_source(File::with_name(path))
            .add_source(app_environment(vars))
            .build()?;

        Self::finish(config)
    }

    /// Defaults shared by every loader
    fn builder(
        vars: &Option<Map<String, String>>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            // The APP__ variable takes precedence when both are set
            .set_default(
                "database.password",
                lookup(vars, LEGACY_PASSWORD_VAR).unwrap_or_default(),
            )
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot reach the database
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.password.trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "database password is required (set APP__DATABASE__PASSWORD or {})",
                LEGACY_PASSWORD_VAR
            )));
        }
        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    /// Build the connection URL; credentials are percent-encoded
    pub fn url(&self) -> Result<String, ConfigError> {
        let base = format!("postgres://{}:{}/{}", self.host, self.port, self.name);
        let mut url = Url::parse(&base)
            .map_err(|e| ConfigError::Message(format!("invalid database address: {}", e)))?;

        url.set_username(&self.user)
            .map_err(|_| ConfigError::Message("invalid database user".to_string()))?;
        url.set_password(Some(&self.password))
            .map_err(|_| ConfigError::Message("invalid database password".to_string()))?;

        Ok(url.into())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            user: default_db_user(),
            password: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            service_name: default_service_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
