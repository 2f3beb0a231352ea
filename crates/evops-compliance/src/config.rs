//! # Evaluator Configuration
//!
//! Tunables for the evaluator, loaded from YAML. Every field has a default,
//! so an empty document (or no file at all) yields the standard behavior:
//!
//! ```yaml
//! expiring_window_days: 30
//! unknown_condition_policy: applies
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use evops_core::EvopsError;

/// Default look-ahead for "expiring soon", in days.
pub const DEFAULT_EXPIRING_WINDOW_DAYS: u32 = 30;

/// Upper bound accepted for the look-ahead window.
pub const MAX_EXPIRING_WINDOW_DAYS: u32 = 365;

/// What an unrecognized condition key means for applicability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownConditionPolicy {
    /// The condition holds (fail-open).
    #[default]
    Applies,
    /// The condition fails, so the requirement does not apply.
    Skips,
}

/// Evaluator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Documents expiring within this many days are reported as expiring soon.
    pub expiring_window_days: u32,
    /// Treatment of condition keys the evaluator does not recognize.
    pub unknown_condition_policy: UnknownConditionPolicy,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            expiring_window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
            unknown_condition_policy: UnknownConditionPolicy::default(),
        }
    }
}

impl EvaluatorConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), EvopsError> {
        if self.expiring_window_days == 0 || self.expiring_window_days > MAX_EXPIRING_WINDOW_DAYS {
            return Err(EvopsError::Config(format!(
                "expiring_window_days must be between 1 and {MAX_EXPIRING_WINDOW_DAYS}, got {}",
                self.expiring_window_days
            )));
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, EvopsError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| EvopsError::Config(format!("invalid evaluator config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a YAML file.
    pub fn load(path: &Path) -> Result<Self, EvopsError> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&raw)?;
        tracing::debug!(path = %path.display(), ?config, "loaded evaluator config");
        Ok(config)
    }
}
