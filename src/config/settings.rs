//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from compiled defaults, TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "SALARYBOARD_CONFIG";

/// Prefix of environment variable overrides, e.g. `SALARYBOARD__SERVER__PORT`
pub const ENV_PREFIX: &str = "SALARYBOARD";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub rate_limit: RateLimitConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling log files; stdout only when unset
    pub directory: Option<String>,
    pub json: bool,
    pub max_files: usize,
}

/// Listing and search limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub default_per_page: u32,
    pub max_per_page: u32,
    pub default_search_limit: u32,
    pub max_search_limit: u32,
}

/// Per-client rate limiting of write endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_minute: u32,
    pub burst: u32,
}

impl Settings {
    /// Load settings from defaults, configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::load_from(&path)
    }

    /// Load settings using `path` as the configuration file (extension optional)
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            );

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::SalaryBoardError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/salaryboard".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
                run_migrations: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                json: false,
                max_files: 7,
            },
            api: ApiConfig {
                default_per_page: 20,
                max_per_page: 100,
                default_search_limit: 20,
                max_search_limit: 50,
            },
            rate_limit: RateLimitConfig {
                enabled: true,
                requests_per_minute: 30,
                burst: 10,
            },
        }
    }
}
