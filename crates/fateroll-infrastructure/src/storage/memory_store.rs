//! Process-local key-value store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use fateroll_core::error::Result;
use fateroll_core::store::KeyValueStore;

/// Keeps values in memory only; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fateroll_core::store::keys;

    #[test]
    fn test_basic_operations() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set(keys::WORKING_SET, "{}").unwrap();
        store.set(keys::WEIGHT_SNAPSHOTS, "{}").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(keys::WORKING_SET).unwrap().as_deref(), Some("{}"));

        store.remove(keys::WORKING_SET).unwrap();
        assert!(store.get(keys::WORKING_SET).unwrap().is_none());

        store.clear_all().unwrap();
        assert!(store.is_empty());
    }
}
