//! Registry of decision sets, deduplicated by fingerprint.

use chrono::{DateTime, Utc};

use super::model::{DecisionSet, fingerprint};
use crate::error::{FaterollError, Result};
use crate::ids::next_id;
use crate::option::{DiceOption, Mode};

/// Tracks every distinct option configuration that has been drawn.
///
/// Sets are kept newest-first and are never evicted.
#[derive(Debug, Clone, Default)]
pub struct DecisionSetRegistry {
    sets: Vec<DecisionSet>,
}

impl DecisionSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sets(sets: Vec<DecisionSet>) -> Self {
        Self { sets }
    }

    pub fn sets(&self) -> &[DecisionSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, fingerprint: &str) -> Option<&DecisionSet> {
        self.sets.iter().find(|s| s.fingerprint == fingerprint)
    }

    /// Counts one draw of `options`.
    ///
    /// A known fingerprint bumps `use_count` and `last_used_at`; an unknown one
    /// inserts a new set holding its own copy of the options.
    pub fn record_use(
        &mut self,
        options: &[DiceOption],
        mode: Mode,
        now: DateTime<Utc>,
    ) -> &DecisionSet {
        let key = fingerprint(options);

        if let Some(index) = self.sets.iter().position(|s| s.fingerprint == key) {
            let set = &mut self.sets[index];
            set.use_count = set.use_count.saturating_add(1);
            set.last_used_at = now;
            tracing::debug!(
                "[DecisionSetRegistry] Reused set {} ({} uses)",
                set.id,
                set.use_count
            );
            return &self.sets[index];
        }

        let last_id = self.sets.iter().map(|s| s.id).max();
        let set = DecisionSet {
            id: next_id(last_id, now),
            fingerprint: key,
            options: options.to_vec(),
            mode,
            use_count: 1,
            last_used_at: now,
            is_favorite: false,
        };
        tracing::debug!("[DecisionSetRegistry] New set {}", set.id);
        self.sets.insert(0, set);
        &self.sets[0]
    }

    /// The `limit` most used sets; ties go to the more recently used one.
    pub fn top_by_use_count(&self, limit: usize) -> Vec<&DecisionSet> {
        let mut ranked: Vec<&DecisionSet> = self.sets.iter().collect();
        ranked.sort_by(|a, b| {
            b.use_count
                .cmp(&a.use_count)
                .then_with(|| b.last_used_at.cmp(&a.last_used_at))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Flips the favorite flag of a set and returns the new value.
    pub fn toggle_favorite(&mut self, fingerprint: &str) -> Result<bool> {
        let set = self
            .sets
            .iter_mut()
            .find(|s| s.fingerprint == fingerprint)
            .ok_or_else(|| FaterollError::not_found("decision set", fingerprint))?;
        set.is_favorite = !set.is_favorite;
        Ok(set.is_favorite)
    }

    /// Deletes a set. History records sharing the fingerprint are the
    /// caller's to remove (see `HistoryStore::remove_by_fingerprint`).
    pub fn remove(&mut self, fingerprint: &str) -> Option<DecisionSet> {
        let index = self.sets.iter().position(|s| s.fingerprint == fingerprint)?;
        Some(self.sets.remove(index))
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }
}
