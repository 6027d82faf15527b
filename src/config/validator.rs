//! Configuration validator for procmem
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{Config, ConfigError, LoggingConfig, MemoryConfig};
use crate::memory::MAX_PROBE_SIZE;

const VALID_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_memory(&config.memory)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    fn validate_memory(memory: &MemoryConfig) -> Result<(), ConfigError> {
        // One UTF-16 unit is the smallest probe either decoder can use
        if memory.initial_probe_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "initial_probe_size must be at least 2, got {}",
                memory.initial_probe_size
            )));
        }

        if memory.initial_probe_size > MAX_PROBE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "initial_probe_size must be at most {}, got {}",
                MAX_PROBE_SIZE, memory.initial_probe_size
            )));
        }

        if memory.pointer_width != 32 && memory.pointer_width != 64 {
            return Err(ConfigError::Invalid(format!(
                "pointer_width must be 32 or 64, got {}",
                memory.pointer_width
            )));
        }

        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        if !VALID_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, VALID_LEVELS
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_probe_size() {
        let mut config = Config::default();
        config.memory.initial_probe_size = 1;
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("initial_probe_size"));

        config.memory.initial_probe_size = 2;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_probe_size_upper_bound() {
        let mut config = Config::default();
        config.memory.initial_probe_size = MAX_PROBE_SIZE;
        assert!(validate_config(&config).is_ok());

        config.memory.initial_probe_size = MAX_PROBE_SIZE + 1;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("at most"));

        config.memory.initial_probe_size = usize::MAX;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_pointer_width() {
        let mut config = Config::default();
        for width in [0, 16, 48, 128] {
            config.memory.pointer_width = width;
            assert!(validate_config(&config).is_err());
        }

        config.memory.pointer_width = 64;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("log level"));

        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
