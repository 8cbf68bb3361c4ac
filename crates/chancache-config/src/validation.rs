//! Configuration validation module.
//!
//! Collects every problem in one pass so a bad deployment fails fast at
//! startup with the full list.

use crate::{AppConfig, CacheFamilyConfig, LocalCacheConfig, ObservabilityConfig};
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A cache family has no room for entries.
    ZeroCacheSize { family: String },
    /// Maximum value size must allow at least one byte.
    ZeroMaxValueBytes,
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCacheSize { family } => {
                write!(f, "Cache family '{}' must have a size greater than 0", family)
            }
            Self::ZeroMaxValueBytes => {
                write!(f, "cache.max_value_bytes must be greater than 0")
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_cache(config: &LocalCacheConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.enabled {
            return;
        }

        for (family, CacheFamilyConfig { size, .. }) in config.families() {
            if size == 0 {
                errors.push(ConfigValidationError::ZeroCacheSize {
                    family: family.to_string(),
                });
            }
        }

        if config.max_value_bytes == 0 {
            errors.push(ConfigValidationError::ZeroMaxValueBytes);
        }
    }

    fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_family_size() {
        let mut config = AppConfig::default();
        config.cache.guest_counts.size = 0;
        config.cache.members_for_user.size = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ConfigValidationError::ZeroCacheSize {
            family: "guest_counts".to_string()
        }));
        assert!(errors.contains(&ConfigValidationError::ZeroCacheSize {
            family: "members_for_user".to_string()
        }));
    }

    #[test]
    fn test_disabled_cache_skips_size_checks() {
        let mut config = AppConfig::default();
        config.cache.enabled = false;
        config.cache.member_counts.size = 0;
        config.cache.max_value_bytes = 0;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.observability.log_level = "verbose".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            &errors[0],
            ConfigValidationError::InvalidLogLevel { value } if value == "verbose"
        ));
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = AppConfig::default();
        config.observability.log_level = "DEBUG".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigValidationError::ZeroCacheSize {
            family: "channel_by_id".to_string(),
        };
        assert!(err.to_string().contains("channel_by_id"));
    }
}
