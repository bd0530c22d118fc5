//! Directory-backed key-value store.
//!
//! Each key lives in its own `<key>.json` file inside one directory:
//!
//! ```text
//! ~/.local/share/fateroll/
//! ├── decisionHistory.json
//! ├── decisionSets.json
//! ├── favoriteDecisions.json
//! ├── workingSet.json
//! └── weightSnapshots.json
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fateroll_core::error::{FaterollError, Result};
use fateroll_core::store::KeyValueStore;

use super::atomic_file::AtomicFile;

const FILE_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if needed) the store directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!("[JsonFileStore] Using {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FaterollError::validation(format!(
                "Invalid storage key: '{}'",
                key
            )));
        }
        Ok(AtomicFile::new(
            self.root.join(format!("{}.{}", key, FILE_EXTENSION)),
        ))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.file(key)?.read()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file(key)?.write(value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file(key)?.remove()
    }

    fn clear_all(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == FILE_EXTENSION) {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        tracing::info!("[JsonFileStore] Cleared {} key(s)", removed);
        Ok(())
    }
}
