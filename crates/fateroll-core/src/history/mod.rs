//! History domain module.
//!
//! - `model`: [`HistoryRecord`], [`HistoryView`] and [`HistoryListing`]
//! - `store`: [`HistoryStore`], the capped newest-first log

mod model;
mod store;

pub use model::{HistoryListing, HistoryRecord, HistoryView};
pub use store::{DEFAULT_FREQUENT_LIMIT, HISTORY_LIMIT, HistoryStore};
