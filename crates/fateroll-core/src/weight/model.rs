//! The weight model: live options, the active mode and the per-mode weight memory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::partition::{PARTITION_TOTAL, randomized_partition};
use crate::error::{FaterollError, Result};
use crate::option::{DiceOption, Mode, OptionId, clamp_weight, normalize_emoji};
use crate::random::RandomSource;

/// Weight given to a new option in `preference` mode.
pub const DEFAULT_PREFERENCE_WEIGHT: f64 = 50.0;
/// Weight given to a new option in `fair` mode (ignored by fair draws).
pub const DEFAULT_FAIR_WEIGHT: f64 = 1.0;

/// Remembered weights of one mode, keyed by option id.
pub type WeightSnapshot = BTreeMap<OptionId, f64>;

/// The two weight memories. `fair` has none because it is always derived.
///
/// An empty `fate` snapshot means fate weights have never been generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightSnapshots {
    pub preference: WeightSnapshot,
    pub fate: WeightSnapshot,
}

/// The live option list together with its mode, as persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkingSet {
    pub mode: Mode,
    pub options: Vec<DiceOption>,
}

/// Owns the live options and keeps their weights consistent with the mode.
///
/// Every mutation computes new weights first and only then swaps them in,
/// so callers never observe a half-reconciled list.
#[derive(Debug, Clone, Default)]
pub struct WeightModel {
    mode: Mode,
    options: Vec<DiceOption>,
    snapshots: WeightSnapshots,
}

impl WeightModel {
    /// Creates an empty model in the given mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Rebuilds a model from persisted parts.
    pub fn from_parts(working_set: WorkingSet, snapshots: WeightSnapshots) -> Self {
        Self {
            mode: working_set.mode,
            options: working_set.options,
            snapshots,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn options(&self) -> &[DiceOption] {
        &self.options
    }

    pub fn snapshots(&self) -> &WeightSnapshots {
        &self.snapshots
    }

    pub fn option(&self, id: &str) -> Option<&DiceOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Snapshot of the option list and mode for persistence.
    pub fn working_set(&self) -> WorkingSet {
        WorkingSet {
            mode: self.mode,
            options: self.options.clone(),
        }
    }

    fn option_mut(&mut self, id: &str) -> Result<&mut DiceOption> {
        self.options
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| FaterollError::not_found("option", id))
    }

    // ============================================================================
    // Option list editing
    // ============================================================================

    /// Appends a new option whose starting weight depends on the active mode.
    pub fn add_option(
        &mut self,
        name: &str,
        emoji: &str,
        rng: &mut dyn RandomSource,
    ) -> Result<&DiceOption> {
        let name = validate_name(name)?;
        let weight = match self.mode {
            Mode::Preference => DEFAULT_PREFERENCE_WEIGHT,
            Mode::Fate => f64::from(rng.next_int_inclusive(1, 100)),
            Mode::Fair => DEFAULT_FAIR_WEIGHT,
        };

        self.options.push(DiceOption::new(name, emoji, weight));
        let added = &self.options[self.options.len() - 1];
        tracing::debug!("[WeightModel] Added option '{}' with weight {}", added.name, weight);
        Ok(added)
    }

    /// Removes an option. Remembered weights for its id are kept.
    pub fn remove_option(&mut self, id: &str) -> Result<DiceOption> {
        let index = self
            .options
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| FaterollError::not_found("option", id))?;
        Ok(self.options.remove(index))
    }

    pub fn rename_option(&mut self, id: &str, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.option_mut(id)?.name = name;
        Ok(())
    }

    pub fn set_emoji(&mut self, id: &str, emoji: &str) -> Result<()> {
        self.option_mut(id)?.emoji = normalize_emoji(emoji);
        Ok(())
    }

    /// Replaces the option list and mode wholesale, without reconciliation.
    ///
    /// Used to bring back a past configuration exactly as it was drawn.
    pub fn replace(&mut self, options: Vec<DiceOption>, mode: Mode) {
        self.options = options;
        self.mode = mode;
    }

    /// Drops options and both snapshots, returning to `mode`.
    pub fn reset(&mut self, mode: Mode) {
        *self = Self::new(mode);
    }

    // ============================================================================
    // Weight rules
    // ============================================================================

    /// Switches mode and reconciles every option's weight.
    ///
    /// Leaving `preference` stores the current weights; entering `fate`
    /// reuses remembered fate weights where they exist.
    pub fn set_mode(&mut self, new_mode: Mode, rng: &mut dyn RandomSource) {
        if self.mode == Mode::Preference {
            self.snapshots.preference = self
                .options
                .iter()
                .map(|o| (o.id.clone(), o.weight))
                .collect();
        }

        let weights: Vec<f64> = match new_mode {
            Mode::Fair => {
                let equal = PARTITION_TOTAL / self.options.len().max(1) as f64;
                vec![equal; self.options.len()]
            }
            Mode::Fate => {
                let weights = self.fate_weights(rng);
                self.snapshots.fate = self.snapshot_of(&weights);
                weights
            }
            Mode::Preference => self
                .options
                .iter()
                .map(|o| {
                    self.snapshots
                        .preference
                        .get(&o.id)
                        .copied()
                        .unwrap_or(o.weight)
                })
                .collect(),
        };

        self.apply(&weights);
        tracing::info!("[WeightModel] Mode changed: {} -> {}", self.mode, new_mode);
        self.mode = new_mode;
    }

    /// Sets one option's weight, clamped to `[1, 100]`.
    ///
    /// In `preference` mode the value is remembered as well.
    pub fn update_weight(&mut self, id: &str, raw_weight: f64) -> Result<f64> {
        let weight = clamp_weight(raw_weight);
        let mode = self.mode;
        self.option_mut(id)?.weight = weight;

        if mode == Mode::Preference {
            self.snapshots.preference.insert(id.to_string(), weight);
        }
        Ok(weight)
    }

    /// Throws away the fate memory and draws a new partition for all options.
    pub fn regenerate_fate_weights(&mut self, rng: &mut dyn RandomSource) -> Result<()> {
        if self.mode != Mode::Fate {
            return Err(FaterollError::validation(format!(
                "Fate weights can only be regenerated in fate mode (current mode: {})",
                self.mode
            )));
        }

        let weights = partition_weights(self.options.len(), rng);
        self.snapshots.fate = self.snapshot_of(&weights);
        self.apply(&weights);
        Ok(())
    }

    /// Percentage shown to the user for `option`. Never used by draws.
    pub fn display_weight(&self, option: &DiceOption) -> f64 {
        match self.mode {
            Mode::Fair => (PARTITION_TOTAL / self.options.len().max(1) as f64).round(),
            Mode::Fate => {
                // A zero share still counts as 1 towards the total.
                let total: f64 = self
                    .options
                    .iter()
                    .map(|o| if o.weight == 0.0 { 1.0 } else { o.weight })
                    .sum();
                if total <= 0.0 {
                    0.0
                } else {
                    (option.weight / total * PARTITION_TOTAL).round()
                }
            }
            Mode::Preference => option.weight,
        }
    }

    /// [`Self::display_weight`] for every option, in list order.
    pub fn display_weights(&self) -> Vec<f64> {
        self.options.iter().map(|o| self.display_weight(o)).collect()
    }

    fn fate_weights(&self, rng: &mut dyn RandomSource) -> Vec<f64> {
        if self.snapshots.fate.is_empty() {
            return partition_weights(self.options.len(), rng);
        }

        self.options
            .iter()
            .map(|o| match self.snapshots.fate.get(&o.id) {
                Some(&weight) => weight,
                None => f64::from(rng.next_int_inclusive(1, 100)),
            })
            .collect()
    }

    fn snapshot_of(&self, weights: &[f64]) -> WeightSnapshot {
        self.options
            .iter()
            .zip(weights)
            .map(|(o, &w)| (o.id.clone(), w))
            .collect()
    }

    fn apply(&mut self, weights: &[f64]) {
        for (option, &weight) in self.options.iter_mut().zip(weights) {
            option.weight = weight;
        }
    }
}

fn partition_weights(n: usize, rng: &mut dyn RandomSource) -> Vec<f64> {
    randomized_partition(n, rng)
        .into_iter()
        .map(f64::from)
        .collect()
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FaterollError::validation("Option name must not be empty"));
    }
    Ok(trimmed.to_string())
}
