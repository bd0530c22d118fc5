//! Monotonic identifiers for history records and decision sets.

use chrono::{DateTime, Utc};

/// Next id after `last`, based on the millisecond clock.
///
/// Ids never go backwards, even if the clock does or two draws land in the
/// same millisecond, so ordering by id equals insertion order.
pub fn next_id(last: Option<u64>, now: DateTime<Utc>) -> u64 {
    let clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    match last {
        Some(last) => clock.max(last + 1),
        None => clock,
    }
}
