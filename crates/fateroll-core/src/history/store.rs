//! Bounded draw history with titles and favorites.

use std::collections::BTreeSet;

use super::model::{HistoryListing, HistoryRecord, HistoryView};
use crate::decision_set::DecisionSetRegistry;

/// Maximum number of records kept; older ones are evicted.
pub const HISTORY_LIMIT: usize = 50;
/// Default size of the `frequent` listing.
pub const DEFAULT_FREQUENT_LIMIT: usize = 10;

/// Newest-first log of draws.
///
/// Favorites are a separate set of record ids rather than a record field, so a
/// favorite mark is untouched by edits to the record itself.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
    favorites: BTreeSet<u64>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the store from persisted parts, enforcing order and the cap.
    pub fn from_parts(mut records: Vec<HistoryRecord>, favorites: BTreeSet<u64>) -> Self {
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(HISTORY_LIMIT);
        Self { records, favorites }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn favorites(&self) -> &BTreeSet<u64> {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Highest id in the log or the favorites, used to keep new ids increasing.
    ///
    /// Favorites may outlive their records, so they count too.
    pub fn last_id(&self) -> Option<u64> {
        self.records
            .iter()
            .map(|r| r.id)
            .chain(self.favorites.iter().copied())
            .max()
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.contains(&id)
    }

    /// Prepends `record` and evicts the oldest entries beyond the cap.
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
        if self.records.len() > HISTORY_LIMIT {
            let evicted = self.records.len() - HISTORY_LIMIT;
            self.records.truncate(HISTORY_LIMIT);
            tracing::debug!("[HistoryStore] Evicted {} old record(s)", evicted);
        }
    }

    /// Sets the custom title. Returns false if no record has this id.
    pub fn set_title(&mut self, id: u64, title: &str) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.custom_title = Some(title.to_string());
                true
            }
            None => false,
        }
    }

    /// Adds or removes `id` from the favorites; returns the new state.
    pub fn toggle_favorite(&mut self, id: u64) -> bool {
        if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<HistoryRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Drops every record drawn from the given configuration.
    pub fn remove_by_fingerprint(&mut self, fingerprint: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.decision_set_fingerprint != fingerprint);
        before - self.records.len()
    }

    /// Removes all records and favorites.
    pub fn clear_all(&mut self) {
        self.records.clear();
        self.favorites.clear();
    }

    /// Records for `view`, newest first. `frequent` lists decision sets from
    /// `registry` instead, at most `frequent_limit` of them.
    pub fn filter<'a>(
        &'a self,
        view: HistoryView,
        registry: &'a DecisionSetRegistry,
        frequent_limit: usize,
    ) -> HistoryListing<'a> {
        match view {
            HistoryView::Recent => HistoryListing::Records(self.sorted(|_| true)),
            HistoryView::Favorite => {
                HistoryListing::Records(self.sorted(|r| self.favorites.contains(&r.id)))
            }
            HistoryView::Frequent => {
                HistoryListing::DecisionSets(registry.top_by_use_count(frequent_limit))
            }
        }
    }

    fn sorted(&self, keep: impl Fn(&HistoryRecord) -> bool) -> Vec<&HistoryRecord> {
        let mut records: Vec<&HistoryRecord> = self.records.iter().filter(|&r| keep(r)).collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }
}
