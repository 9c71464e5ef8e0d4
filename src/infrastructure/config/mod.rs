//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid history capacity: {0}. Must be at least 1")]
    InvalidHistoryCapacity(usize),

    #[error("Invalid debounce delay: {0}ms. Must be positive")]
    InvalidDebounceDelay(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .axiom/config.yaml (project config)
    /// 3. .axiom/local.yaml (project local overrides, optional)
    /// 4. Environment variables (AXIOM_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".axiom/config.yaml"))
            .merge(Yaml::file(".axiom/local.yaml"))
            .merge(Env::prefixed("AXIOM_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.history.capacity == 0 {
            return Err(ConfigError::InvalidHistoryCapacity(config.history.capacity));
        }

        if config.debounce.commit_ms == 0 {
            return Err(ConfigError::InvalidDebounceDelay(config.debounce.commit_ms));
        }
        if config.debounce.cost_estimate_ms == 0 {
            return Err(ConfigError::InvalidDebounceDelay(
                config.debounce.cost_estimate_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.history.capacity, 50);
        assert_eq!(config.debounce.commit_ms, 800);
        ConfigLoader::validate(&config).expect("default config should be valid");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = Config::default();
        config.history.capacity = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidHistoryCapacity(0))
        ));
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let mut config = Config::default();
        config.debounce.commit_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidDebounceDelay(0))
        ));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
