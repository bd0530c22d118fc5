//! The decision engine facade.
//!
//! `DecisionEngine` wires the weight model, the selection algorithm, the
//! decision set registry and the history store together, and writes every
//! change through to a [`KeyValueStore`].
//!
//! Each mutating call updates in-memory state first and persists second. A
//! failed write is returned to the caller, but the in-memory state stays
//! authoritative for the rest of the session.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;

use crate::config::AppConfig;
use crate::decision_set::{DecisionSet, DecisionSetRegistry};
use crate::error::{FaterollError, Result};
use crate::history::{HistoryListing, HistoryRecord, HistoryStore, HistoryView};
use crate::ids::next_id;
use crate::option::{DiceOption, Mode};
use crate::random::{RandomSource, entropy_source};
use crate::selection::{
    DrawGuard, DrawOutcome, DrawState, DrawTicket, PresentationDelay, select,
};
use crate::store::{self, KeyValueStore, keys};
use crate::weight::{WeightModel, WeightSnapshots, WorkingSet};

/// A draw whose winner is decided but not yet published.
///
/// Obtained from [`DecisionEngine::begin_draw`] and handed back to
/// [`DecisionEngine::complete_draw`]. Dropping it abandons the draw: nothing is
/// recorded and the engine returns to idle.
#[derive(Debug)]
#[must_use = "a pending draw is abandoned unless passed to complete_draw"]
pub struct PendingDraw {
    outcome: DrawOutcome,
    options: Vec<DiceOption>,
    mode: Mode,
    ticket: DrawTicket,
}

impl PendingDraw {
    /// The already decided outcome.
    pub fn outcome(&self) -> &DrawOutcome {
        &self.outcome
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

pub struct DecisionEngine {
    weights: WeightModel,
    registry: DecisionSetRegistry,
    history: HistoryStore,
    guard: DrawGuard,
    store: Arc<dyn KeyValueStore>,
    rng: Box<dyn RandomSource + Send>,
    default_mode: Mode,
    frequent_limit: usize,
}

impl DecisionEngine {
    /// Loads persisted state from `store`.
    ///
    /// Missing or malformed values start empty; loading never fails.
    pub fn load(store: Arc<dyn KeyValueStore>, config: &AppConfig) -> Self {
        let working_set: Option<WorkingSet> = store::load_or_default(&*store, keys::WORKING_SET);
        let working_set = working_set.unwrap_or_else(|| WorkingSet {
            mode: config.default_mode,
            options: Vec::new(),
        });
        let snapshots: WeightSnapshots = store::load_or_default(&*store, keys::WEIGHT_SNAPSHOTS);
        let records: Vec<HistoryRecord> = store::load_or_default(&*store, keys::DECISION_HISTORY);
        let favorites: BTreeSet<u64> = store::load_or_default(&*store, keys::FAVORITE_DECISIONS);
        let sets: Vec<DecisionSet> = store::load_or_default(&*store, keys::DECISION_SETS);

        tracing::info!(
            "[DecisionEngine] Loaded {} option(s) in {} mode, {} record(s), {} decision set(s)",
            working_set.options.len(),
            working_set.mode,
            records.len(),
            sets.len()
        );

        Self {
            weights: WeightModel::from_parts(working_set, snapshots),
            registry: DecisionSetRegistry::from_sets(sets),
            history: HistoryStore::from_parts(records, favorites),
            guard: DrawGuard::new(),
            store,
            rng: entropy_source(),
            default_mode: config.default_mode,
            frequent_limit: config.frequent_limit,
        }
    }

    /// Replaces the random source, e.g. with a seeded one.
    pub fn with_random(mut self, rng: Box<dyn RandomSource + Send>) -> Self {
        self.rng = rng;
        self
    }

    // ============================================================================
    // Read access
    // ============================================================================

    pub fn mode(&self) -> Mode {
        self.weights.mode()
    }

    pub fn options(&self) -> &[DiceOption] {
        self.weights.options()
    }

    pub fn weights(&self) -> &WeightModel {
        &self.weights
    }

    pub fn registry(&self) -> &DecisionSetRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn draw_state(&self) -> DrawState {
        self.guard.state()
    }

    /// Percentages to show next to each option.
    pub fn display_weights(&self) -> Vec<f64> {
        self.weights.display_weights()
    }

    /// The history tab `view`.
    pub fn listing(&self, view: HistoryView) -> HistoryListing<'_> {
        self.history.filter(view, &self.registry, self.frequent_limit)
    }

    // ============================================================================
    // Options and weights
    // ============================================================================

    pub fn add_option(&mut self, name: &str, emoji: &str) -> Result<DiceOption> {
        let added = self.weights.add_option(name, emoji, &mut *self.rng)?.clone();
        self.persist_working_set()?;
        Ok(added)
    }

    pub fn remove_option(&mut self, id: &str) -> Result<DiceOption> {
        let removed = self.weights.remove_option(id)?;
        self.persist_working_set()?;
        Ok(removed)
    }

    pub fn rename_option(&mut self, id: &str, name: &str) -> Result<()> {
        self.weights.rename_option(id, name)?;
        self.persist_working_set()
    }

    pub fn set_emoji(&mut self, id: &str, emoji: &str) -> Result<()> {
        self.weights.set_emoji(id, emoji)?;
        self.persist_working_set()
    }

    /// Clamps and assigns a weight; returns the stored value.
    pub fn update_weight(&mut self, id: &str, raw_weight: f64) -> Result<f64> {
        let weight = self.weights.update_weight(id, raw_weight)?;
        self.persist_working_set()?;
        Ok(weight)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.weights.set_mode(mode, &mut *self.rng);
        self.persist_working_set()
    }

    pub fn regenerate_fate_weights(&mut self) -> Result<()> {
        self.weights.regenerate_fate_weights(&mut *self.rng)?;
        self.persist_working_set()
    }

    /// Loads the options and mode of a past draw, exactly as they were.
    pub fn reuse_record(&mut self, id: u64) -> Result<()> {
        let record = self
            .history
            .get(id)
            .ok_or_else(|| FaterollError::not_found("history record", id.to_string()))?;
        let (options, mode) = (record.options.clone(), record.mode);
        self.weights.replace(options, mode);
        self.persist_working_set()
    }

    /// Loads the options and mode stored in a decision set.
    pub fn reuse_decision_set(&mut self, fingerprint: &str) -> Result<()> {
        let set = self
            .registry
            .get(fingerprint)
            .ok_or_else(|| FaterollError::not_found("decision set", fingerprint))?;
        let (options, mode) = (set.options.clone(), set.mode);
        self.weights.replace(options, mode);
        self.persist_working_set()
    }

    // ============================================================================
    // Drawing
    // ============================================================================

    /// Decides a winner and enters the drawing state.
    ///
    /// Rejected when there are no options or another draw is pending.
    pub fn begin_draw(&mut self) -> Result<PendingDraw> {
        if self.weights.is_empty() {
            return Err(FaterollError::validation("Add at least one option before drawing"));
        }
        let ticket = self.guard.begin()?;

        let options = self.weights.options().to_vec();
        let mode = self.weights.mode();
        let Some(outcome) = select(&options, mode, &mut *self.rng) else {
            return Err(FaterollError::internal("selection produced no winner"));
        };

        tracing::debug!(
            "[DecisionEngine] Draw started in {} mode, winner decided: {}",
            mode,
            outcome.winner.name
        );
        Ok(PendingDraw {
            outcome,
            options,
            mode,
            ticket,
        })
    }

    /// Publishes a pending draw: counts the decision set, appends a history
    /// record, leaves the drawing state and persists.
    ///
    /// The engine is idle afterwards even if persisting fails.
    pub fn complete_draw(&mut self, pending: PendingDraw) -> Result<DrawOutcome> {
        let PendingDraw {
            outcome,
            options,
            mode,
            ticket,
        } = pending;

        let now = Utc::now();
        let fingerprint = self
            .registry
            .record_use(&options, mode, now)
            .fingerprint
            .clone();

        let record = HistoryRecord {
            id: next_id(self.history.last_id(), now),
            timestamp: now,
            mode,
            options,
            result: outcome.winner.clone(),
            decision_set_fingerprint: fingerprint,
            custom_title: None,
        };
        self.history.append(record);
        ticket.finish();

        tracing::info!("[DecisionEngine] {}", outcome.message);

        self.persist_decision_sets()?;
        self.persist_history()?;
        Ok(outcome)
    }

    /// Full draw: decide, wait for `delay`, publish.
    ///
    /// If the returned future is dropped during the delay, the draw is
    /// abandoned and the engine is idle again.
    pub async fn roll(&mut self, delay: &dyn PresentationDelay) -> Result<DrawOutcome> {
        let pending = self.begin_draw()?;
        delay.wait().await;
        self.complete_draw(pending)
    }

    // ============================================================================
    // History curation
    // ============================================================================

    /// Sets a record's title. Returns false (and writes nothing) for an unknown id.
    pub fn set_title(&mut self, id: u64, title: &str) -> Result<bool> {
        if !self.history.set_title(id, title) {
            return Ok(false);
        }
        self.persist_history()?;
        Ok(true)
    }

    /// Toggles a record id in the favorites; returns the new state.
    pub fn toggle_favorite(&mut self, id: u64) -> Result<bool> {
        let favorite = self.history.toggle_favorite(id);
        store::save(&*self.store, keys::FAVORITE_DECISIONS, self.history.favorites())?;
        Ok(favorite)
    }

    pub fn toggle_decision_set_favorite(&mut self, fingerprint: &str) -> Result<bool> {
        let favorite = self.registry.toggle_favorite(fingerprint)?;
        self.persist_decision_sets()?;
        Ok(favorite)
    }

    pub fn remove_record(&mut self, id: u64) -> Result<HistoryRecord> {
        let removed = self
            .history
            .remove(id)
            .ok_or_else(|| FaterollError::not_found("history record", id.to_string()))?;
        self.persist_history()?;
        Ok(removed)
    }

    /// Deletes a decision set together with every record drawn from it.
    pub fn remove_decision_set(&mut self, fingerprint: &str) -> Result<DecisionSet> {
        let removed = self
            .registry
            .remove(fingerprint)
            .ok_or_else(|| FaterollError::not_found("decision set", fingerprint))?;
        let cascaded = self.history.remove_by_fingerprint(fingerprint);
        tracing::debug!(
            "[DecisionEngine] Removed decision set {} and {} record(s)",
            removed.id,
            cascaded
        );

        self.persist_decision_sets()?;
        self.persist_history()?;
        Ok(removed)
    }

    /// Clears history, favorites and decision sets. Options and weights stay.
    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear_all();
        self.registry.clear();

        self.store.remove(keys::DECISION_HISTORY)?;
        self.store.remove(keys::DECISION_SETS)?;
        self.store.remove(keys::FAVORITE_DECISIONS)
    }

    /// Forgets everything, including options, weight memories and any
    /// front-end keys in the store.
    pub fn reset_all(&mut self) -> Result<()> {
        self.history.clear_all();
        self.registry.clear();
        self.weights.reset(self.default_mode);
        tracing::info!("[DecisionEngine] All data reset");
        self.store.clear_all()
    }

    // ============================================================================
    // Persistence
    // ============================================================================

    fn persist_working_set(&self) -> Result<()> {
        store::save(&*self.store, keys::WORKING_SET, &self.weights.working_set())?;
        store::save(&*self.store, keys::WEIGHT_SNAPSHOTS, self.weights.snapshots())
    }

    fn persist_history(&self) -> Result<()> {
        store::save(&*self.store, keys::DECISION_HISTORY, self.history.records())?;
        store::save(&*self.store, keys::FAVORITE_DECISIONS, self.history.favorites())
    }

    fn persist_decision_sets(&self) -> Result<()> {
        store::save(&*self.store, keys::DECISION_SETS, self.registry.sets())
    }
}
