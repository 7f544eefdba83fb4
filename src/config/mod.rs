//! Configuration management module
//!
//! This module handles loading and validation of application configuration
//! from defaults, TOML files and environment variables.

pub mod settings;
pub mod validation;

pub use settings::{Settings, ServerConfig, DatabaseConfig, LoggingConfig, ApiConfig, RateLimitConfig};
