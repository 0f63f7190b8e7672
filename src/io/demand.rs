// src/io/demand.rs

use crate::error::{EoqError, EoqResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Same demand every period.
pub fn generate_constant_demand(periods: usize, value: u32) -> Vec<u32> {
    vec![value; periods]
}

/// Demand at `before` until `step_at`, then `after` for the rest.
/// A sudden jump is the classic stress test for a reorder point.
pub fn generate_step_demand(periods: usize, step_at: usize, before: u32, after: u32) -> Vec<u32> {
    (0..periods)
        .map(|p| if p < step_at { before } else { after })
        .collect()
}

/// Normally distributed demand, rounded and clamped at zero.
///
/// # Arguments
/// * `periods` - Length of the schedule.
/// * `mean` - Average demand per period.
/// * `std_dev` - Volatility per period.
/// * `seed` - Same seed, same schedule.
pub fn generate_normal_demand(periods: usize, mean: f64, std_dev: f64, seed: u64) -> EoqResult<Vec<u32>> {
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| EoqError::invalid("std_dev", e.to_string()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    Ok((0..periods)
        .map(|_| {
            // Demand cannot be negative
            let sample: f64 = normal.sample(&mut rng);
            sample.round().max(0.0) as u32
        })
        .collect())
}
