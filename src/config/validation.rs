//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{SalaryBoardError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_api_config(&settings.api)?;
    validate_rate_limit_config(&settings.rate_limit)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(SalaryBoardError::Config(
            "Server host is required".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SalaryBoardError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(SalaryBoardError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SalaryBoardError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(SalaryBoardError::Config(
            "Acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SalaryBoardError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SalaryBoardError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if matches!(config.directory.as_deref(), Some("")) {
        return Err(SalaryBoardError::Config(
            "Log directory cannot be empty; omit it to log to stdout only".to_string()
        ));
    }

    Ok(())
}

/// Hard ceilings no configuration may raise
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Validate listing limits
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.max_per_page > MAX_PAGE_SIZE {
        return Err(SalaryBoardError::Config(format!(
            "Max page size must be at most {}", MAX_PAGE_SIZE
        )));
    }

    if config.max_search_limit > MAX_SEARCH_LIMIT {
        return Err(SalaryBoardError::Config(format!(
            "Max search limit must be at most {}", MAX_SEARCH_LIMIT
        )));
    }

    if config.default_per_page == 0 || config.default_per_page > config.max_per_page {
        return Err(SalaryBoardError::Config(
            "Default page size must be between 1 and the max page size".to_string()
        ));
    }

    if config.default_search_limit == 0 || config.default_search_limit > config.max_search_limit {
        return Err(SalaryBoardError::Config(
            "Default search limit must be between 1 and the max search limit".to_string()
        ));
    }

    Ok(())
}

/// Validate rate limit configuration
fn validate_rate_limit_config(config: &super::RateLimitConfig) -> Result<()> {
    if config.enabled && (config.requests_per_minute == 0 || config.burst == 0) {
        return Err(SalaryBoardError::Config(
            "Rate limit quota and burst must be greater than 0".to_string()
        ));
    }

    Ok(())
}
