//! Selection module.
//!
//! - `algorithm`: the weighted-random pick ([`select`])
//! - `draw`: the draw guard and the presentation delay abstraction

mod algorithm;
mod draw;

pub use algorithm::{DrawOutcome, select, weighted_index};
pub use draw::{
    DEFAULT_PRESENTATION_DELAY, DrawGuard, DrawState, DrawTicket, FixedDelay, NoDelay,
    PresentationDelay,
};
