//! Agent configuration model.
//!
//! Loaded by `infrastructure::config::ConfigLoader` with hierarchical
//! merging; every field carries a serde default so partial files work.

use serde::{Deserialize, Serialize};

/// Main configuration structure for a Noesis agent instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Session store configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Adaptation loop configuration.
    #[serde(default)]
    pub adaptation: AdaptationConfig,

    /// Knowledge shaping configuration.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            adaptation: AdaptationConfig::default(),
            knowledge: KnowledgeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    /// Completed-session history retention. The system this core models
    /// kept history unbounded; `None` reproduces that, the default bounds
    /// it and drops the oldest record first.
    #[serde(default = "default_history_limit")]
    pub history_limit: Option<usize>,
}

fn default_history_limit() -> Option<usize> {
    Some(1000)
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

/// Adaptation loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdaptationConfig {
    /// Final session confidence above which `self_improve` runs after an
    /// orchestration call.
    #[serde(default = "default_trigger_confidence")]
    pub trigger_confidence: f64,
}

const fn default_trigger_confidence() -> f64 {
    0.8
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            trigger_confidence: default_trigger_confidence(),
        }
    }
}

/// Knowledge shaping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KnowledgeConfig {
    /// Validity window of shaped records, in days. Zero means unbounded.
    #[serde(default = "default_validity_days")]
    pub validity_days: i64,
}

const fn default_validity_days() -> i64 {
    30
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            validity_days: default_validity_days(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.session.history_limit, Some(1000));
        assert_eq!(config.adaptation.trigger_confidence, 0.8);
        assert_eq!(config.knowledge.validity_days, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"adaptation": {"trigger_confidence": 0.9}}"#).unwrap();
        assert_eq!(config.adaptation.trigger_confidence, 0.9);
        assert_eq!(config.session.history_limit, Some(1000));
    }
}
