//! Weight model module.
//!
//! - `model`: [`WeightModel`], the owner of live options and per-mode weight memory
//! - `partition`: the randomized partition used to generate `fate` weights

mod model;
mod partition;

pub use model::{
    DEFAULT_FAIR_WEIGHT, DEFAULT_PREFERENCE_WEIGHT, WeightModel, WeightSnapshot, WeightSnapshots,
    WorkingSet,
};
pub use partition::{PARTITION_TOTAL, randomized_partition};
