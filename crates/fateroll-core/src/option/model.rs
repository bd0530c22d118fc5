//! Option and mode domain models.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

/// Lowest weight a user can assign in `preference`/`fate` modes.
pub const MIN_WEIGHT: f64 = 1.0;
/// Highest weight a user can assign in `preference`/`fate` modes.
pub const MAX_WEIGHT: f64 = 100.0;
/// Emoji used when the caller does not pick one.
pub const DEFAULT_EMOJI: &str = "📝";

/// Identifier of a [`DiceOption`].
pub type OptionId = String;

/// How option weights are derived.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    /// Every option is equally likely; weights are display-only.
    Fair,
    /// The user sets each weight by hand.
    #[default]
    Preference,
    /// Weights are generated at random and kept until regenerated.
    Fate,
}

impl Mode {
    /// Symbol shown next to the mode in listings.
    pub fn symbol(&self) -> &'static str {
        match self {
            Mode::Fair => "🎲",
            Mode::Preference => "🎯",
            Mode::Fate => "🌀",
        }
    }
}

/// A labeled choice taking part in a draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceOption {
    pub id: OptionId,
    pub name: String,
    pub emoji: String,
    /// Raw weight. Integral in `[1, 100]` once set by the user; `100 / n` in
    /// `fair` mode; possibly `0` when produced by a randomized partition.
    pub weight: f64,
}

impl DiceOption {
    /// Creates an option with a fresh identifier.
    pub fn new(name: impl Into<String>, emoji: impl Into<String>, weight: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, emoji, weight)
    }

    /// Creates an option with a caller-supplied identifier.
    pub fn with_id(
        id: impl Into<OptionId>,
        name: impl Into<String>,
        emoji: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: normalize_emoji(&emoji.into()),
            weight,
        }
    }

    /// `emoji name`, as shown in results and listings.
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// Falls back to [`DEFAULT_EMOJI`] for blank input.
pub fn normalize_emoji(emoji: &str) -> String {
    let trimmed = emoji.trim();
    if trimmed.is_empty() {
        DEFAULT_EMOJI.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Rounds a user-entered weight and clamps it to `[MIN_WEIGHT, MAX_WEIGHT]`.
///
/// NaN collapses to the minimum.
pub fn clamp_weight(raw: f64) -> f64 {
    if raw.is_nan() {
        return MIN_WEIGHT;
    }
    raw.round().clamp(MIN_WEIGHT, MAX_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_strings() {
        assert_eq!(Mode::Fate.to_string(), "fate");
        assert_eq!(Mode::from_str("Preference").unwrap(), Mode::Preference);
        assert!(Mode::from_str("chaos").is_err());
        assert_eq!(Mode::default(), Mode::Preference);
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&Mode::Fair).unwrap();
        assert_eq!(json, "\"fair\"");
    }

    #[test]
    fn test_empty_emoji_falls_back() {
        let option = DiceOption::new("Pizza", " ", 50.0);
        assert_eq!(option.emoji, DEFAULT_EMOJI);
        assert!(!option.id.is_empty());
    }

    #[test]
    fn test_clamp_weight() {
        assert_eq!(clamp_weight(0.0), 1.0);
        assert_eq!(clamp_weight(250.0), 100.0);
        assert_eq!(clamp_weight(42.0), 42.0);
        assert_eq!(clamp_weight(f64::NAN), 1.0);
        assert_eq!(clamp_weight(f64::INFINITY), 100.0);
        assert_eq!(clamp_weight(42.7), 43.0);
        assert_eq!(clamp_weight(42.2), 42.0);
        assert_eq!(clamp_weight(0.6), 1.0);
    }
}
