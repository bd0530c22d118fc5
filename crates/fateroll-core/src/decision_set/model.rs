//! Decision set domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::option::{DiceOption, Mode};

/// Separator between `name-weight` pairs in a fingerprint.
pub const FINGERPRINT_SEPARATOR: &str = "|";

/// A recurring option configuration and how often it has been drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionSet {
    pub id: u64,
    pub fingerprint: String,
    /// Options exactly as they were at the first draw.
    pub options: Vec<DiceOption>,
    pub mode: Mode,
    pub use_count: u32,
    pub last_used_at: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Deterministic key of an ordered option configuration.
///
/// Built from `name-weight` per option in list order, so the same options in a
/// different order produce a different fingerprint.
pub fn fingerprint(options: &[DiceOption]) -> String {
    options
        .iter()
        .map(|o| format!("{}-{}", o.name, o.weight))
        .collect::<Vec<_>>()
        .join(FINGERPRINT_SEPARATOR)
}
