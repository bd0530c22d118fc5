//! Randomized weight generation for `fate` mode.

use crate::random::RandomSource;

/// Lower bound of each raw draw; keeps every share away from zero before rounding.
const PARTITION_LOW: f64 = 0.1;
const PARTITION_HIGH: f64 = 1.1;
/// Target sum of a partition.
pub const PARTITION_TOTAL: f64 = 100.0;

/// Splits 100 into `n` random integer shares.
///
/// Each share is rounded independently, so the sum may drift from 100 by a
/// few units. Shares can round down to 0 when `n` is large.
pub fn randomized_partition(n: usize, rng: &mut dyn RandomSource) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }

    let raw: Vec<f64> = (0..n)
        .map(|_| rng.next_in(PARTITION_LOW, PARTITION_HIGH))
        .collect();
    let sum: f64 = raw.iter().sum();

    raw.into_iter()
        .map(|value| (value / sum * PARTITION_TOTAL).round() as u32)
        .collect()
}
