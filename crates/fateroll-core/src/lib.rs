pub mod config;
pub mod decision_set;
pub mod engine;
pub mod error;
pub mod history;
pub mod ids;
pub mod option;
pub mod random;
pub mod selection;
pub mod store;
pub mod weight;

// Re-export common types
pub use config::AppConfig;
pub use engine::{DecisionEngine, PendingDraw};
pub use error::{FaterollError, Result};
pub use history::{HistoryListing, HistoryRecord, HistoryView};
pub use option::{DiceOption, Mode};
pub use selection::{DrawOutcome, DrawState, FixedDelay, NoDelay, PresentationDelay};
pub use store::KeyValueStore;
