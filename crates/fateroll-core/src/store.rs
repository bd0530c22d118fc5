//! Key-value persistence contract.
//!
//! The engine stores each piece of state as an opaque JSON blob under a fixed
//! key. Backends only have to move strings around.

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Logical keys written by the engine.
pub mod keys {
    /// History records, newest first.
    pub const DECISION_HISTORY: &str = "decisionHistory";
    /// Decision sets.
    pub const DECISION_SETS: &str = "decisionSets";
    /// Ids of favorite history records.
    pub const FAVORITE_DECISIONS: &str = "favoriteDecisions";
    /// Live option list and mode.
    pub const WORKING_SET: &str = "workingSet";
    /// Preference and fate weight memories.
    pub const WEIGHT_SNAPSHOTS: &str = "weightSnapshots";
    /// Emoji palette of the front end. Not read by the engine, but removed by
    /// a full reset.
    pub const EMOJI_LIST: &str = "emojiList";
}

/// A synchronous string store. Every call is all-or-nothing.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Deletes every key.
    fn clear_all(&self) -> Result<()>;
}

/// Reads and decodes `key`, falling back to `T::default()`.
///
/// Missing keys are normal on first start. Unreadable or malformed values are
/// logged and replaced by the default; a broken blob must never stop startup.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!("[Store] Failed to read '{}', starting empty: {}", key, e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("[Store] Malformed value under '{}', starting empty: {}", key, e);
            T::default()
        }
    }
}

/// Encodes `value` as JSON and writes it under `key`.
pub fn save<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
