//! Container-level properties: growth curve, append, shift layout,
//! insert/erase inverse, deep copies, equality and ordering.

use proptest::prelude::*;
use slimvec::growth::good_size;
use slimvec::{SlimVec, SlimVecError};
use slimvec_test_utils::fixtures::{ascending, gradient};
use slimvec_test_utils::Pixel;

#[test]
fn growth_curve_after_first_third_fifth_append() {
    let mut vec = SlimVec::new();
    vec.push(Pixel::gray(0));
    assert_eq!(vec.capacity(), 2);
    vec.push(Pixel::gray(1));
    vec.push(Pixel::gray(2));
    assert_eq!(vec.capacity(), 4);
    vec.push(Pixel::gray(3));
    vec.push(Pixel::gray(4));
    assert_eq!(vec.capacity(), 8);
}

#[test]
fn append_preserves_values_in_order() {
    let vec = ascending(1000);
    assert_eq!(vec.len(), 1000);
    assert!(vec.iter().enumerate().all(|(i, &v)| v == i as u32));
    assert_eq!(vec.capacity(), good_size(1000));
}

#[test]
fn deep_copy_is_independent() {
    let c1 = gradient(6);
    let mut c2 = c1.clone();
    c2.push_back(&Pixel::gray(200));
    c2[0] = Pixel::gray(99);
    assert_eq!(c1.len(), 6);
    assert_eq!(c1, gradient(6));
    assert_eq!(c2.len(), 7);
}

#[test]
fn equality_examples() {
    let c = SlimVec::from([1, 2, 3]);
    let d = SlimVec::from_slice(&[1, 2, 3]);
    let e = SlimVec::from([1, 2]);
    assert!(c == d);
    assert!(!(c == e));
}

#[test]
fn ordering_examples() {
    assert!(SlimVec::from([1, 2]) < SlimVec::from([1, 2, 3]));
    assert!(!(SlimVec::from([1, 3]) < SlimVec::from([1, 2, 9])));
}

#[test]
fn pixels_compare_by_bytes() {
    let a = gradient(3);
    let mut b = gradient(3);
    assert_eq!(a, b);
    b[1].a = 0;
    assert_ne!(a, b);
    assert!(b < a);
}

#[test]
fn try_reserve_reports_overflow() {
    let mut vec = ascending(3);
    assert_eq!(
        vec.try_reserve(usize::MAX),
        Err(SlimVecError::CapacityOverflow {
            requested: usize::MAX
        })
    );
    assert_eq!(vec.as_slice(), &[0, 1, 2]);
}

#[test]
fn nested_containers_clone_deeply() {
    let inner = SlimVec::from([1u8, 2]);
    let outer = SlimVec::from_elem(3, &inner);
    let mut copy = outer.clone();
    copy[0].push(3);
    assert_eq!(outer[0].as_slice(), &[1, 2]);
    assert_eq!(copy[0].as_slice(), &[1, 2, 3]);
    assert_eq!(copy[1].as_slice(), &[1, 2]);
}

proptest! {
    #[test]
    fn len_never_exceeds_capacity(
        ops in proptest::collection::vec((0u8..5, any::<u16>()), 0..80),
    ) {
        let mut vec = SlimVec::<u16>::new();
        for (kind, arg) in ops {
            let pos = arg as usize % (vec.len() + 1);
            match kind {
                0 => vec.push(arg),
                1 => {
                    vec.insert_n(pos, (arg % 4) as usize, &arg);
                }
                2 => vec.erase(pos),
                3 => vec.resize((arg % 40) as usize),
                _ => vec.clear(),
            }
            prop_assert!(vec.len() <= vec.capacity());
        }
    }

    #[test]
    fn erase_range_undoes_insert_slice(
        base in proptest::collection::vec(any::<u8>(), 0..32),
        extra in proptest::collection::vec(any::<u8>(), 0..8),
        pos in any::<usize>(),
    ) {
        let original = SlimVec::from_slice(&base);
        let pos = pos % (base.len() + 1);
        let mut vec = original.clone();
        let at = vec.insert_slice(pos, &extra);
        prop_assert_eq!(at, pos);
        prop_assert_eq!(&vec[pos..pos + extra.len()], extra.as_slice());
        vec.erase_range(at..at + extra.len());
        prop_assert_eq!(vec, original);
    }

    #[test]
    fn pixel_insert_shift_layout(
        n in 0usize..12,
        len in 0usize..24,
        pos in any::<usize>(),
        level in any::<u8>(),
    ) {
        let before = gradient(len);
        let pos = pos % (len + 1);
        let mut vec = before.clone();
        vec.insert_n(pos, n, &Pixel::gray(level));
        prop_assert_eq!(&vec[..pos], &before[..pos]);
        prop_assert!(vec[pos..pos + n].iter().all(|p| *p == Pixel::gray(level)));
        prop_assert_eq!(&vec[pos + n..], &before[pos..]);
    }
}
