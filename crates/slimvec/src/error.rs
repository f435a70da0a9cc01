//! Error type for the fallible reservation path.

use std::error::Error;
use std::fmt;

/// Errors reported by [`SlimVec::try_reserve`](crate::SlimVec::try_reserve).
///
/// The infallible operations never return this type: they panic on
/// capacity overflow and abort through `handle_alloc_error` when the
/// allocator fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlimVecError {
    /// The capacity chosen for the request, or its size in bytes, does not
    /// fit in `usize` / `isize`.
    CapacityOverflow {
        /// Number of slots that were requested.
        requested: usize,
    },
    /// The global allocator returned a null pointer.
    AllocFailed {
        /// Size of the rejected allocation in bytes.
        bytes: usize,
        /// Alignment of the rejected allocation.
        align: usize,
    },
}

impl fmt::Display for SlimVecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: requested {requested} slots")
            }
            Self::AllocFailed { bytes, align } => {
                write!(
                    f,
                    "allocation failed: {bytes} bytes with alignment {align}"
                )
            }
        }
    }
}

impl Error for SlimVecError {}
