//! Capacity growth policy.
//!
//! When an operation needs `need` slots and the buffer holds fewer, the
//! container reallocates to [`good_size`]`(need)`: twice the largest power
//! of two not exceeding `need`. Appending one element at a time therefore
//! observes capacities 2, 4, 8, 16, ... and reallocates O(log n) times for
//! n appends.

/// Capacity chosen for a request of `need` slots.
///
/// `good_size(0) == 0`; for `need >= 1` the result is
/// `2 << floor(log2(need))`, which is always strictly greater than `need`.
///
/// # Panics
///
/// Panics with `"capacity overflow"` if the result does not fit in a
/// `usize`. Use [`checked_good_size`] on fallible paths.
pub fn good_size(need: usize) -> usize {
    match checked_good_size(need) {
        Some(cap) => cap,
        None => capacity_overflow(),
    }
}

/// Like [`good_size`], but returns `None` instead of panicking when the
/// result is not representable.
pub fn checked_good_size(need: usize) -> Option<usize> {
    if need == 0 {
        return Some(0);
    }
    // 2 << k == 1 << (k + 1); checked_shl rejects k + 1 == usize::BITS.
    1usize.checked_shl(need.ilog2() + 1)
}

#[cold]
#[track_caller]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_need_is_zero() {
        assert_eq!(good_size(0), 0);
    }

    #[test]
    fn small_needs() {
        assert_eq!(good_size(1), 2);
        assert_eq!(good_size(2), 4);
        assert_eq!(good_size(3), 4);
        assert_eq!(good_size(4), 8);
        assert_eq!(good_size(5), 8);
        assert_eq!(good_size(7), 8);
        assert_eq!(good_size(8), 16);
    }

    #[test]
    fn result_exceeds_need() {
        for need in 1..10_000usize {
            let cap = good_size(need);
            assert!(cap > need, "good_size({need}) = {cap}");
            assert!(cap.is_power_of_two());
            assert!(cap <= need * 2);
        }
    }

    #[test]
    fn top_bit_overflows() {
        let top = 1usize << (usize::BITS - 1);
        assert_eq!(checked_good_size(top), None);
        assert_eq!(checked_good_size(usize::MAX), None);
        assert_eq!(checked_good_size(top - 1), Some(top));
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn good_size_panics_on_overflow() {
        good_size(usize::MAX);
    }
}
