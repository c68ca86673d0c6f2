//! Scheduler configuration.
//!
//! Loaded from TOML; every field is optional.
//!
//! ```toml
//! starvation_threshold = 300
//! deadline = 1000
//! arrival_policy = "clamp"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::models::{ArrivalPolicy, Tick};

/// Default aging threshold in logical time units.
pub const DEFAULT_STARVATION_THRESHOLD: Tick = 300;

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// A submission that has waited longer than this is promoted to the
    /// starvation lane at the next dispatch cycle.
    #[serde(default = "default_threshold")]
    pub starvation_threshold: Tick,

    /// Latest admissible arrival time. `None` = no deadline.
    #[serde(default)]
    pub deadline: Option<Tick>,

    /// Handling of arrivals earlier than the current clock.
    #[serde(default)]
    pub arrival_policy: ArrivalPolicy,
}

fn default_threshold() -> Tick {
    DEFAULT_STARVATION_THRESHOLD
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            starvation_threshold: default_threshold(),
            deadline: None,
            arrival_policy: ArrivalPolicy::default(),
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starvation threshold.
    pub fn with_threshold(mut self, threshold: Tick) -> Self {
        self.starvation_threshold = threshold;
        self
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: Tick) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the arrival policy.
    pub fn with_arrival_policy(mut self, policy: ArrivalPolicy) -> Self {
        self.arrival_policy = policy;
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(?path, "Loading scheduler config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starvation_threshold < 0 {
            return Err(ConfigError::Invalid(format!(
                "starvation_threshold must be non-negative, got {}",
                self.starvation_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.starvation_threshold, 300);
        assert_eq!(config.deadline, None);
        assert_eq!(config.arrival_policy, ArrivalPolicy::Reject);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SchedulerConfig::from_toml_str("").unwrap();
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = SchedulerConfig::from_toml_str(
            r#"
            starvation_threshold = 60
            deadline = 1000
            arrival_policy = "permissive"
            "#,
        )
        .unwrap();
        assert_eq!(config.starvation_threshold, 60);
        assert_eq!(config.deadline, Some(1000));
        assert_eq!(config.arrival_policy, ArrivalPolicy::Permissive);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = SchedulerConfig::from_toml_str("starvation_threshold = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_policy_rejected() {
        let err = SchedulerConfig::from_toml_str("arrival_policy = \"rewind\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SchedulerConfig::load("/nonexistent/u-dispatch.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_builder_roundtrip_toml() {
        let config = SchedulerConfig::new()
            .with_threshold(10)
            .with_deadline(500)
            .with_arrival_policy(ArrivalPolicy::Clamp);
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SchedulerConfig::from_toml_str(&text).unwrap(), config);
    }
}
