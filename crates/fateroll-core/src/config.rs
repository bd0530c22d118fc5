//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every field has a
//! default, so an empty or partial file is valid.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::history::DEFAULT_FREQUENT_LIMIT;
use crate::option::Mode;
use crate::selection::DEFAULT_PRESENTATION_DELAY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the platform data directory for persisted state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Pause before a draw result is revealed.
    pub presentation_delay_ms: u64,
    /// Mode used on first start and after a full reset.
    pub default_mode: Mode,
    /// Number of decision sets in the `frequent` listing.
    pub frequent_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            presentation_delay_ms: DEFAULT_PRESENTATION_DELAY.as_millis() as u64,
            default_mode: Mode::default(),
            frequent_limit: DEFAULT_FREQUENT_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn presentation_delay(&self) -> Duration {
        Duration::from_millis(self.presentation_delay_ms)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.presentation_delay(), Duration::from_secs(1));
        assert_eq!(config.default_mode, Mode::Preference);
        assert_eq!(config.frequent_limit, 10);
        assert!(config.storage_dir.is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::from_toml_str("default_mode = \"fate\"\n").unwrap();
        assert_eq!(config.default_mode, Mode::Fate);
        assert_eq!(config.presentation_delay_ms, 1000);
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig {
            storage_dir: Some(PathBuf::from("/tmp/fateroll")),
            presentation_delay_ms: 250,
            ..AppConfig::default()
        };
        let parsed = AppConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let err = AppConfig::from_toml_str("presentation_delay_ms = \"soon\"").unwrap_err();
        assert!(err.is_serialization());
    }
}
