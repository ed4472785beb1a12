//! Runtime configuration
//!
//! Read from an optional JSON file, then overridden by `SYNERGOS_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use synergos_analytics::AnalyticsConfig;
use synergos_approval::WorkflowConfig;
use thiserror::Error;

pub const ENV_CURRENCY: &str = "SYNERGOS_CURRENCY";
pub const ENV_CASHIN_CREDITS: &str = "SYNERGOS_CASHIN_CREDITS_ON_APPROVAL";
pub const ENV_TREND_WINDOW: &str = "SYNERGOS_TREND_WINDOW_DAYS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },

    #[error("Invalid config: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergosConfig {
    /// Currency reported by the wallet provider
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub workflow: WorkflowConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

fn default_currency() -> String {
    "MAD".to_string()
}

impl Default for SynergosConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            workflow: WorkflowConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl SynergosConfig {
    /// File (if any), then process environment, then validation
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply overrides from `lookup` (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(currency) = lookup(ENV_CURRENCY) {
            self.currency = currency;
        }

        if let Some(value) = lookup(ENV_CASHIN_CREDITS) {
            self.workflow.cashin_credits_on_approval = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Env {
                        var: ENV_CASHIN_CREDITS,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(ENV_TREND_WINDOW) {
            self.analytics.trend_window_days = value.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_TREND_WINDOW,
                value: value.clone(),
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Validation("currency must not be empty".to_string()));
        }
        if self.analytics.trend_window_days == 0 {
            return Err(ConfigError::Validation(
                "trend_window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config: SynergosConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SynergosConfig::default());
        assert_eq!(config.currency, "MAD");
        assert!(!config.workflow.cashin_credits_on_approval);
        assert_eq!(config.analytics.trend_window_days, 7);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = SynergosConfig::default();
        config
            .apply_overrides(env(&[
                (ENV_CURRENCY, "EUR"),
                (ENV_CASHIN_CREDITS, "true"),
                (ENV_TREND_WINDOW, "30"),
            ]))
            .unwrap();

        assert_eq!(config.currency, "EUR");
        assert!(config.workflow.cashin_credits_on_approval);
        assert_eq!(config.analytics.trend_window_days, 30);
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = SynergosConfig::default();
        let result = config.apply_overrides(env(&[(ENV_TREND_WINDOW, "a week")]));
        assert!(matches!(result, Err(ConfigError::Env { var: ENV_TREND_WINDOW, .. })));
    }

    #[test]
    fn test_validation() {
        let mut config = SynergosConfig::default();
        config.analytics.trend_window_days = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = SynergosConfig::default();
        config.currency = " ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
