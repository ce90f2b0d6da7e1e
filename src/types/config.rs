//! Runtime configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::types::{AppMode, VibePattern};
use crate::{
    ALARM_INTERVAL_MS, BATCH_SIZE, DEVIATION_THRESHOLD, RESUBSCRIBE_DELAY_MS, SAMPLING_RATE_HZ,
};

/// Errors loading or validating an [`AppConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {field} {message}")]
    Invalid { field: &'static str, message: String },
}

/// Tunables of the detector and alarm. Every field falls back to the crate
/// constant when missing from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mode: AppMode,

    /// Deviation above which the alarm arms
    #[serde(default = "default_threshold")]
    pub deviation_threshold: u16,

    /// Interval between alarm pulses
    #[serde(default = "default_interval")]
    pub alarm_interval_ms: u64,

    /// Wait after dismissal before listening to the sensor again
    #[serde(default = "default_resubscribe_delay")]
    pub resubscribe_delay_ms: u64,

    /// Samples per batch requested from the feed
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_sampling_rate")]
    pub sampling_rate_hz: u32,

    /// Pattern sent on every alarm pulse
    #[serde(default = "default_alarm_pattern")]
    pub alarm_pattern: VibePattern,
}

fn default_threshold() -> u16 {
    DEVIATION_THRESHOLD
}

fn default_interval() -> u64 {
    ALARM_INTERVAL_MS
}

fn default_resubscribe_delay() -> u64 {
    RESUBSCRIBE_DELAY_MS
}

fn default_batch_size() -> usize {
    BATCH_SIZE
}

fn default_sampling_rate() -> u32 {
    SAMPLING_RATE_HZ
}

fn default_alarm_pattern() -> VibePattern {
    VibePattern::Long
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: AppMode::default(),
            deviation_threshold: default_threshold(),
            alarm_interval_ms: default_interval(),
            resubscribe_delay_ms: default_resubscribe_delay(),
            batch_size: default_batch_size(),
            sampling_rate_hz: default_sampling_rate(),
            alarm_pattern: default_alarm_pattern(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse configuration from JSON text and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alarm_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "alarm_interval_ms",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "batch_size",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.batch_size > crate::MAX_BATCH_SAMPLES {
            return Err(ConfigError::Invalid {
                field: "batch_size",
                message: format!("must be at most {}", crate::MAX_BATCH_SAMPLES),
            });
        }
        if self.sampling_rate_hz == 0 {
            return Err(ConfigError::Invalid {
                field: "sampling_rate_hz",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.deviation_threshold, DEVIATION_THRESHOLD);
        assert_eq!(config.alarm_interval_ms, 1000);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_json(
            r#"{"deviation_threshold": 1300, "mode": "feedback", "resubscribe_delay_ms": 500}"#,
        )
        .unwrap();
        assert_eq!(config.deviation_threshold, 1300);
        assert_eq!(config.mode, AppMode::Feedback);
        assert_eq!(config.resubscribe_delay_ms, 500);
        assert_eq!(config.batch_size, BATCH_SIZE);
        assert_eq!(config.alarm_pattern, VibePattern::Long);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = AppConfig::from_json(r#"{"alarm_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "alarm_interval_ms", .. }));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = AppConfig::from_json(r#"{"batch_size": 0}"#).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn test_oversized_batch_size_rejected() {
        let json = format!(r#"{{"batch_size": {}}}"#, crate::MAX_BATCH_SAMPLES + 1);
        let err = AppConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "batch_size", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
