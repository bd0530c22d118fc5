//! Decision set module.
//!
//! A decision set is an option configuration recognised by its fingerprint,
//! with a use counter.

mod model;
mod registry;

pub use model::{DecisionSet, FINGERPRINT_SEPARATOR, fingerprint};
pub use registry::DecisionSetRegistry;
