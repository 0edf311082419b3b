use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid adaptation trigger: {0}. Must be within [0, 1]")]
    InvalidAdaptationTrigger(f64),

    #[error("Invalid knowledge validity_days: {0}. Must be non-negative")]
    InvalidValidityDays(i64),

    #[error("Invalid session history_limit: 0. Use null for unbounded retention")]
    ZeroHistoryLimit,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. noesis.yaml in the working directory
    /// 3. Environment variables (NOESIS_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("noesis.yaml"))
            .merge(Env::prefixed("NOESIS_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
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

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let trigger = config.adaptation.trigger_confidence;
        if !(0.0..=1.0).contains(&trigger) {
            return Err(ConfigError::InvalidAdaptationTrigger(trigger));
        }

        if config.knowledge.validity_days < 0 {
            return Err(ConfigError::InvalidValidityDays(
                config.knowledge.validity_days,
            ));
        }

        if config.session.history_limit == Some(0) {
            return Err(ConfigError::ZeroHistoryLimit);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        assert!(ConfigLoader::validate(&config).is_ok());
        assert_eq!(config.adaptation.trigger_confidence, 0.8);
        assert_eq!(config.session.history_limit, Some(1000));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "adaptation:\n  trigger_confidence: 0.7\nlogging:\n  level: debug"
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.adaptation.trigger_confidence, 0.7);
        assert_eq!(config.logging.level, "debug");
        // Untouched sections keep their defaults.
        assert_eq!(config.knowledge.validity_days, 30);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_out_of_range_trigger_rejected() {
        let mut config = Config::default();
        config.adaptation.trigger_confidence = 1.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidAdaptationTrigger(_))
        ));
    }

    #[test]
    fn test_zero_history_limit_rejected() {
        let mut config = Config::default();
        config.session.history_limit = Some(0);
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ZeroHistoryLimit)
        ));
    }

    #[test]
    fn test_file_validation_failure_surfaces() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "knowledge:\n  validity_days: -1").unwrap();
        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }
}
