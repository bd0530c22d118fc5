//! History domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::decision_set::DecisionSet;
use crate::option::{DiceOption, Mode};

/// One completed draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub mode: Mode,
    /// Options and weights in effect when the draw was made.
    pub options: Vec<DiceOption>,
    pub result: DiceOption,
    pub decision_set_fingerprint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

impl HistoryRecord {
    /// The custom title, or a title derived from the winner.
    pub fn title(&self) -> String {
        match &self.custom_title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => format!("Decision: {}", self.result.name),
        }
    }
}

/// The tabs of the history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HistoryView {
    #[default]
    Recent,
    Favorite,
    Frequent,
}

/// What a history view lists: per-draw records, or aggregated decision sets
/// for the `frequent` view.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryListing<'a> {
    Records(Vec<&'a HistoryRecord>),
    DecisionSets(Vec<&'a DecisionSet>),
}

impl HistoryListing<'_> {
    pub fn len(&self) -> usize {
        match self {
            HistoryListing::Records(records) => records.len(),
            HistoryListing::DecisionSets(sets) => sets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
