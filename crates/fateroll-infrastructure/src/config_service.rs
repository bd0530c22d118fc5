//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` (by default
//! `~/.config/fateroll/config.toml`) and caches it.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use fateroll_core::config::AppConfig;
use fateroll_core::error::Result;

use crate::paths::FaterollPaths;
use crate::storage::AtomicFile;

/// Loads and caches the application configuration.
///
/// A missing file is created with the defaults; a malformed one is logged and
/// replaced by the defaults in memory, leaving the file untouched.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicFile,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses the platform config file.
    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(FaterollPaths::config_file()?))
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> AppConfig {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref config) = *cached {
                return config.clone();
            }
        }

        let loaded = self.load_config();
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(loaded.clone());
        loaded
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = None;
    }

    fn load_config(&self) -> AppConfig {
        let content = match self.file.read() {
            Ok(Some(content)) => content,
            Ok(None) => return self.create_default(),
            Err(e) => {
                tracing::warn!(
                    "[ConfigService] Failed to read {}, using defaults: {}",
                    self.file.path().display(),
                    e
                );
                return AppConfig::default();
            }
        };

        match AppConfig::from_toml_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "[ConfigService] Malformed {}, using defaults: {}",
                    self.file.path().display(),
                    e
                );
                AppConfig::default()
            }
        }
    }

    fn create_default(&self) -> AppConfig {
        let config = AppConfig::default();
        let written = config
            .to_toml_string()
            .and_then(|content| self.file.write(&content));
        match written {
            Ok(()) => tracing::info!(
                "[ConfigService] Created default config at {}",
                self.file.path().display()
            ),
            Err(e) => tracing::warn!("[ConfigService] Failed to write default config: {}", e),
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fateroll_core::Mode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());

        assert_eq!(service.get_config(), AppConfig::default());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("presentation_delay_ms = 1000"));
    }

    #[test]
    fn test_existing_file_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "default_mode = \"fair\"\nfrequent_limit = 3\n").unwrap();

        let config = ConfigService::new(path).get_config();
        assert_eq!(config.default_mode, Mode::Fair);
        assert_eq!(config.frequent_limit, 3);
        assert_eq!(config.presentation_delay_ms, 1000);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "default_mode = \"chaos\"").unwrap();

        let config = ConfigService::new(path.clone()).get_config();
        assert_eq!(config, AppConfig::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "default_mode = \"chaos\"");
    }

    #[test]
    fn test_cache_and_invalidate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());
        assert_eq!(service.get_config().frequent_limit, 10);

        fs::write(&path, "frequent_limit = 5\n").unwrap();
        assert_eq!(service.get_config().frequent_limit, 10);

        service.invalidate_cache();
        assert_eq!(service.get_config().frequent_limit, 5);
    }
}
