//! Benchmark inputs for the SlimVec container.
//!
//! Positions are drawn from a seeded ChaCha8 generator so every run (and
//! every container under comparison) sees the same workload:
//!
//! - [`insert_positions`]: valid indices for a sequence growing by one per step.
//! - [`erase_positions`]: valid indices for a sequence shrinking by one per step.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default seed shared by all benchmarks.
pub const SEED: u64 = 0x5eed_51e7;

/// `count` insertion indices; the `i`-th is valid for a sequence of
/// length `start_len + i`.
pub fn insert_positions(count: usize, start_len: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| (rng.next_u64() % (start_len + i + 1) as u64) as usize)
        .collect()
}

/// `count` erase indices; the `i`-th is valid for a sequence of length
/// `start_len - i`. Requires `count <= start_len`.
pub fn erase_positions(count: usize, start_len: usize, seed: u64) -> Vec<usize> {
    assert!(count <= start_len, "cannot erase {count} of {start_len} elements");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| (rng.next_u64() % (start_len - i) as u64) as usize)
        .collect()
}
