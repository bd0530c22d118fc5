//! Platform path resolution for fateroll.
//!
//! ```text
//! ~/.config/fateroll/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/fateroll/     # Data directory
//! └── <key>.json               # Persisted engine state (JsonFileStore)
//! ```

use std::path::PathBuf;

use fateroll_core::error::{FaterollError, Result};

const APP_DIR: &str = "fateroll";
const CONFIG_FILE: &str = "config.toml";

pub struct FaterollPaths;

impl FaterollPaths {
    /// Returns the fateroll configuration directory (e.g. `~/.config/fateroll/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| FaterollError::config("Cannot find the config directory"))
    }

    /// Returns the fateroll data directory (e.g. `~/.local/share/fateroll/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| FaterollError::config("Cannot find the data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// The directory holding persisted state.
    ///
    /// # Arguments
    ///
    /// * `override_dir` - Explicit directory (command line or config), used as is
    pub fn storage_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
        match override_dir {
            Some(dir) => Ok(dir),
            None => Self::data_dir(),
        }
    }
}
