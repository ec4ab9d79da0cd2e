//! Common test utilities for the movepool test suite.

#![allow(dead_code)]

use movepool::{Rotation, WeightedStepSelector};
use rand::{SeedableRng, rngs::StdRng};

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a seeded selector with the given moves added one by one.
pub fn seeded_pool(seed: u64, steps: &[i32]) -> WeightedStepSelector<StdRng> {
    let mut pool = WeightedStepSelector::with_rng(StdRng::seed_from_u64(seed));
    for &step in steps {
        pool.add_step(step).expect("test steps must be valid moves");
    }
    pool
}

/// Draw `trials` times, resolving every draw as bad, and count each returned cell.
pub fn draw_frequencies(
    pool: &mut WeightedStepSelector<StdRng>,
    rotation: Rotation,
    trials: usize,
) -> [usize; 9] {
    let mut counts = [0usize; 9];
    for _ in 0..trials {
        let drawn = pool.draw(rotation).expect("pool has weight");
        counts[drawn.value()] += 1;
        pool.confirm_bad().expect("draw is pending");
    }
    counts
}
