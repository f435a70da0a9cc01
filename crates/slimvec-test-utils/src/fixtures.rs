//! Reusable starting containers.
//!
//! - [`ascending`]: `0..n` as `u32`.
//! - [`tracked_run`]: `n` [`Tracked`] values `0..n` sharing one ledger.
//! - [`gradient`]: `n` gray [`Pixel`]s of increasing level.

use std::rc::Rc;

use slimvec::SlimVec;

use crate::{Ledger, Pixel, Tracked};

/// `[0, 1, ..., n - 1]`.
pub fn ascending(n: u32) -> SlimVec<u32> {
    (0..n).collect()
}

/// `n` tracked values `0..n`, all reporting to `ledger`.
pub fn tracked_run(n: i64, ledger: &Rc<Ledger>) -> SlimVec<Tracked> {
    (0..n).map(|v| Tracked::new(v, ledger)).collect()
}

/// `n` gray pixels, level `i` at index `i` (wrapping past 255).
pub fn gradient(n: usize) -> SlimVec<Pixel> {
    (0..n).map(|i| Pixel::gray(i as u8)).collect()
}

/// Values of a tracked container, for comparisons.
pub fn values(vec: &SlimVec<Tracked>) -> Vec<i64> {
    vec.iter().map(|t| t.value).collect()
}
