//! Compile-time classification of element types.
//!
//! Every bulk operation of [`SlimVec`](crate::SlimVec) branches on the
//! element's [`ElementClass`]:
//!
//! - **Trivial** elements are duplicated with a raw byte copy and are never
//!   destroyed explicitly. Only `Copy` types can be classified trivial, so
//!   the fast path never runs for a type with a destructor or a meaningful
//!   `Clone`.
//! - **Non-trivial** elements are duplicated with `Clone::clone`, one at a
//!   time, and destroyed with `drop_in_place`.
//!
//! Relocation (moving live values during growth or shifting) is a byte copy
//! for both classes: every Rust value may be moved to a new address without
//! running code.
//!
//! [`ByteEq`] is a separate, opt-in capability that enables byte-wise
//! equality on whole containers.

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

/// Whether an element type may take the byte-copy fast path.
///
/// Built with [`ElementClass::NON_TRIVIAL`] (any type) or
/// [`ElementClass::TRIVIAL`] (only available for `T: Copy`).
pub struct ElementClass<T> {
    trivial: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ElementClass<T> {
    /// Duplicate with `Clone`, destroy with `drop_in_place`.
    pub const NON_TRIVIAL: Self = Self::assume(false);

    /// Whether this class takes the byte-copy fast path.
    pub const fn is_trivial(&self) -> bool {
        self.trivial
    }

    /// Caller must ensure `trivial` is only `true` when `T: Copy`.
    const fn assume(trivial: bool) -> Self {
        Self {
            trivial,
            _marker: PhantomData,
        }
    }
}

impl<T: Copy> ElementClass<T> {
    /// Duplicate with a byte copy, never destroy.
    pub const TRIVIAL: Self = Self::assume(true);
}

impl<T> Clone for ElementClass<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ElementClass<T> {}

impl<T> std::fmt::Debug for ElementClass<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.trivial {
            f.write_str("ElementClass::TRIVIAL")
        } else {
            f.write_str("ElementClass::NON_TRIVIAL")
        }
    }
}

/// A type that can be stored in a [`SlimVec`](crate::SlimVec).
///
/// The default classification is non-trivial, which is always correct.
/// Plain-data `Copy` types should opt into the fast path:
///
/// ```
/// use slimvec::{Element, ElementClass};
///
/// #[derive(Clone, Copy, Default)]
/// struct Rgb(u8, u8, u8);
///
/// impl Element for Rgb {
///     const CLASS: ElementClass<Self> = ElementClass::TRIVIAL;
/// }
/// ```
pub trait Element: Clone {
    /// How the container duplicates and destroys values of this type.
    const CLASS: ElementClass<Self> = ElementClass::NON_TRIVIAL;
}

/// Whether `T` takes the byte-copy fast path.
#[inline(always)]
pub(crate) const fn is_trivial<T: Element>() -> bool {
    T::CLASS.is_trivial()
}

/// Marks types whose equality is exactly equality of their bytes.
///
/// Enables `PartialEq`, `Eq`, `PartialOrd` and `Ord` on
/// [`SlimVec`](crate::SlimVec), where equality is decided by comparing
/// the raw bytes of the live ranges.
///
/// # Safety
///
/// Implementors must have no padding and no uninitialised bytes, and two
/// values must compare equal exactly when their bytes are identical. Floats
/// do not qualify (`0.0 == -0.0`, `NaN != NaN`), nor do types with padding
/// or custom `PartialEq` impls.
#[allow(unsafe_code)]
pub unsafe trait ByteEq: Element {}

macro_rules! trivial_elements {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const CLASS: ElementClass<Self> = ElementClass::TRIVIAL;
            }
        )*
    };
}

macro_rules! byte_eq {
    ($($t:ty),* $(,)?) => {
        $(
            // SAFETY: integers, bool, char and () have no padding, and every
            // value has a single representation.
            #[allow(unsafe_code)]
            unsafe impl ByteEq for $t {}
        )*
    };
}

trivial_elements!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, (),
);

byte_eq!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, ());

impl<T: ?Sized> Element for &T {
    const CLASS: ElementClass<Self> = ElementClass::TRIVIAL;
}

impl<T: Element, const N: usize> Element for [T; N] {
    // [T; N] is Copy exactly when T is.
    const CLASS: ElementClass<Self> = ElementClass::assume(T::CLASS.is_trivial());
}

// SAFETY: an array of padding-free elements has no padding, and arrays
// compare element-wise.
#[allow(unsafe_code)]
unsafe impl<T: ByteEq, const N: usize> ByteEq for [T; N] {}

impl<T: Element> Element for Option<T> {
    const CLASS: ElementClass<Self> = ElementClass::assume(T::CLASS.is_trivial());
}

impl<A: Element, B: Element> Element for (A, B) {
    const CLASS: ElementClass<Self> =
        ElementClass::assume(A::CLASS.is_trivial() && B::CLASS.is_trivial());
}

impl<A: Element, B: Element, C: Element> Element for (A, B, C) {
    const CLASS: ElementClass<Self> = ElementClass::assume(
        A::CLASS.is_trivial() && B::CLASS.is_trivial() && C::CLASS.is_trivial(),
    );
}

impl<A: Element, B: Element, C: Element, D: Element> Element for (A, B, C, D) {
    const CLASS: ElementClass<Self> = ElementClass::assume(
        A::CLASS.is_trivial()
            && B::CLASS.is_trivial()
            && C::CLASS.is_trivial()
            && D::CLASS.is_trivial(),
    );
}

impl Element for String {}
impl<T: Clone> Element for Vec<T> {}
impl<T: Clone> Element for Box<T> {}
impl<T: ?Sized> Element for Rc<T> {}
impl<T: ?Sized> Element for Arc<T> {}
impl<T: Element> Element for crate::SlimVec<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Default)]
    struct Plain(u32);

    impl Element for Plain {
        const CLASS: ElementClass<Self> = ElementClass::TRIVIAL;
    }

    #[derive(Clone, Default)]
    struct Defaulted;

    impl Element for Defaulted {}

    #[test]
    fn primitives_are_trivial() {
        assert!(is_trivial::<u8>());
        assert!(is_trivial::<i64>());
        assert!(is_trivial::<f32>());
        assert!(is_trivial::<char>());
        assert!(is_trivial::<&str>());
    }

    #[test]
    fn owning_types_are_non_trivial() {
        assert!(!is_trivial::<String>());
        assert!(!is_trivial::<Vec<u8>>());
        assert!(!is_trivial::<Box<u8>>());
        assert!(!is_trivial::<Rc<u8>>());
    }

    #[test]
    fn composites_follow_their_parts() {
        assert!(is_trivial::<[u32; 4]>());
        assert!(!is_trivial::<[String; 2]>());
        assert!(is_trivial::<Option<u16>>());
        assert!(!is_trivial::<Option<String>>());
        assert!(is_trivial::<(u8, f64)>());
        assert!(!is_trivial::<(u8, String)>());
        assert!(is_trivial::<(u8, u8, u8, u8)>());
    }

    #[test]
    fn user_types_choose() {
        assert!(is_trivial::<Plain>());
        assert!(!is_trivial::<Defaulted>());
    }

    #[test]
    fn debug_names_the_class() {
        assert_eq!(format!("{:?}", u8::CLASS), "ElementClass::TRIVIAL");
        assert_eq!(format!("{:?}", String::CLASS), "ElementClass::NON_TRIVIAL");
    }
}
