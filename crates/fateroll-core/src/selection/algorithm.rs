//! Weighted-random selection of a single winner.

use serde::{Deserialize, Serialize};

use crate::option::{DiceOption, Mode};
use crate::random::RandomSource;
use crate::weight::PARTITION_TOTAL;

/// The result of one draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOutcome {
    /// The chosen option, as it was when the draw started.
    pub winner: DiceOption,
    /// Index of the winner in the option list.
    pub winner_index: usize,
    /// Weights used for the draw, one per option, for the distribution display.
    pub weights: Vec<f64>,
    /// Human readable announcement.
    pub message: String,
}

/// Picks one option. Returns `None` only for an empty list.
///
/// `fair` draws a uniform index and reports `100 / n` for every slot.
/// `preference` and `fate` walk the raw weights: a value `r` in `[0, total)`
/// is reduced by each weight in list order and the first option that brings
/// it to `<= 0` wins. A non-positive total falls back to a uniform draw.
pub fn select(
    options: &[DiceOption],
    mode: Mode,
    rng: &mut dyn RandomSource,
) -> Option<DrawOutcome> {
    if options.is_empty() {
        return None;
    }

    let (winner_index, weights) = match mode {
        Mode::Fair => (rng.next_index(options.len()), fair_weights(options.len())),
        Mode::Preference | Mode::Fate => {
            let weights: Vec<f64> = options.iter().map(|o| o.weight).collect();
            (weighted_index(&weights, rng), weights)
        }
    };

    let winner = options[winner_index].clone();
    let message = format!("Selected: {}", winner.label());
    Some(DrawOutcome {
        winner,
        winner_index,
        weights,
        message,
    })
}

fn fair_weights(n: usize) -> Vec<f64> {
    vec![PARTITION_TOTAL / n as f64; n]
}

/// Index chosen by walking `weights` with a uniform value in `[0, total)`.
///
/// `weights` must be non-empty.
pub fn weighted_index(weights: &[f64], rng: &mut dyn RandomSource) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        tracing::warn!(
            "[Selection] Total weight {} is not positive, falling back to uniform selection",
            total
        );
        return rng.next_index(weights.len());
    }

    let mut remaining = rng.next_unit() * total;
    for (index, weight) in weights.iter().enumerate() {
        remaining -= weight;
        if remaining <= 0.0 {
            return index;
        }
    }

    // Float residue can leave a sliver above zero after the last subtraction.
    weights
        .iter()
        .rposition(|w| *w > 0.0)
        .unwrap_or(weights.len() - 1)
}
