pub mod draw;
pub mod history;
pub mod options;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use fateroll_core::{AppConfig, DecisionEngine};
use fateroll_infrastructure::{ConfigService, FaterollPaths, JsonFileStore, MemoryStore};

/// An engine opened on the persisted state, plus the configuration it was
/// opened with.
pub struct Session {
    pub engine: DecisionEngine,
    pub config: AppConfig,
}

impl Session {
    /// Loads the config file and opens the state directory.
    ///
    /// `data_dir` wins over `storage_dir` from the config file.
    pub fn open(data_dir: Option<PathBuf>) -> Result<Self> {
        let config = ConfigService::from_default_location()
            .map(|service| service.get_config())
            .unwrap_or_default();
        Self::open_with(data_dir, config)
    }

    pub fn open_with(data_dir: Option<PathBuf>, config: AppConfig) -> Result<Self> {
        let root = FaterollPaths::storage_dir(data_dir.or_else(|| config.storage_dir.clone()))?;
        let store = JsonFileStore::open(&root)
            .with_context(|| format!("Failed to open data directory {}", root.display()))?;
        tracing::debug!("[Session] Opening state in {}", root.display());
        let engine = DecisionEngine::load(Arc::new(store), &config);
        Ok(Self { engine, config })
    }

    /// Opens an empty session whose state is dropped on exit.
    pub fn in_memory(config: AppConfig) -> Self {
        tracing::debug!("[Session] Opening in-memory state");
        let engine = DecisionEngine::load(Arc::new(MemoryStore::new()), &config);
        Self { engine, config }
    }
}
