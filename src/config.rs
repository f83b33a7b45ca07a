//! Configuration management for the transaction analytics engine

use crate::analytics::scoring::ScoringPolicy;
use crate::types::alert::RiskLevelThresholds;
use crate::types::transaction::Amount;
use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Debits are scored against this multiple of the previous debit
    #[serde(default = "default_jump_multiplier")]
    pub jump_multiplier: Amount,
    /// Amount a transaction must reach for its step to count towards a pattern
    #[serde(default = "default_pattern_threshold")]
    pub pattern_threshold: Amount,
    /// Minimum fraud score that raises an alert
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: Amount,
    /// Risk level classification thresholds
    #[serde(default)]
    pub risk_levels: RiskLevelThresholds,
}

fn default_jump_multiplier() -> Amount {
    ScoringPolicy::default().jump_multiplier
}

fn default_pattern_threshold() -> Amount {
    1000
}

fn default_alert_threshold() -> Amount {
    1
}

impl DetectionConfig {
    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            jump_multiplier: self.jump_multiplier,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            jump_multiplier: default_jump_multiplier(),
            pattern_threshold: default_pattern_threshold(),
            alert_threshold: default_alert_threshold(),
            risk_levels: RiskLevelThresholds::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.detection.jump_multiplier, 2);
        assert_eq!(config.detection.pattern_threshold, 1000);
        assert_eq!(config.detection.alert_threshold, 1);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.detection.scoring_policy(), ScoringPolicy::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                "[detection]\njump_multiplier = 3\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.detection.jump_multiplier, 3);
        assert_eq!(config.detection.pattern_threshold, 1000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(AppConfig::load_from_path("does/not/exist.toml").is_err());
    }
}
