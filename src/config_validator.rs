use validator::Validate;

use crate::config::Config;
use crate::error::WheelError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validates configuration objects for consistency and correctness
pub struct ConfigValidator;

impl ConfigValidator {
    /// Field bounds plus the rules that span several fields
    pub fn validate(config: &Config) -> Result<(), WheelError> {
        config
            .validate()
            .map_err(|e| WheelError::Configuration(e.to_string()))?;

        if let Some(url) = &config.redis_url {
            Self::validate_redis_url(url)?;
            if config.memory_store {
                return Err(WheelError::Configuration(
                    "REDIS_URL and MEMORY_STORE cannot both be set".to_string(),
                ));
            }
        }

        Self::validate_log_level(&config.log_level)
    }

    /// Validates a Redis URL
    pub fn validate_redis_url(url: &str) -> Result<(), WheelError> {
        if url.is_empty() {
            return Err(WheelError::Configuration(
                "Redis URL cannot be empty".to_string(),
            ));
        }

        if !url.starts_with("redis://") && !url.starts_with("rediss://") {
            return Err(WheelError::Configuration(
                "Redis URL must start with 'redis://' or 'rediss://'".to_string(),
            ));
        }

        Ok(())
    }

    pub fn validate_log_level(level: &str) -> Result<(), WheelError> {
        if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            return Err(WheelError::Configuration(format!(
                "Invalid log level '{}'. Must be one of: {:?}",
                level, LOG_LEVELS
            )));
        }

        Ok(())
    }
}
