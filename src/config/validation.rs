//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{MeetSmartError, Result};
use super::{CacheBackend, Settings};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_engine_config(&settings.engine)?;
    validate_logging_config(&settings.logging)?;

    if settings.cache.enabled && settings.cache.backend == CacheBackend::Redis {
        validate_redis_config(&settings.redis)?;
    }

    Ok(())
}

/// Validate engine configuration
fn validate_engine_config(config: &super::EngineConfig) -> Result<()> {
    if config.max_candidates == 0 {
        return Err(MeetSmartError::Config(
            "Max candidates must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(MeetSmartError::Config(
            "Redis URL is required".to_string()
        ));
    }

    if config.ttl_seconds == 0 {
        return Err(MeetSmartError::Config(
            "Redis TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MeetSmartError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(MeetSmartError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
