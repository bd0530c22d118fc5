//! Option domain module.
//!
//! A draw chooses between [`DiceOption`]s; the active [`Mode`] decides how
//! their weights are derived.

mod model;

pub use model::{
    DEFAULT_EMOJI, DiceOption, MAX_WEIGHT, MIN_WEIGHT, Mode, OptionId, clamp_weight,
    normalize_emoji,
};
