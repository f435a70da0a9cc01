//! The [`SlimVec`] container.

#![allow(unsafe_code)]

use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut, Range};
use std::ptr;
use std::slice;

use crate::element::{is_trivial, ByteEq, Element};
use crate::error::SlimVecError;
use crate::growth::{capacity_overflow, checked_good_size, good_size};
use crate::raw::RawBuf;

/// A contiguous growable array.
///
/// Slots `[0, len)` hold live values; slots `[len, capacity)` are
/// allocated but uninitialised. Capacity grows according to
/// [`good_size`](crate::growth::good_size) and never shrinks. Any growth
/// moves every element to a new allocation.
///
/// Duplicating operations (`push_back`, `insert*`, `resize`, `clone`) take
/// a byte-copy fast path for [trivial](crate::ElementClass::TRIVIAL)
/// elements and call `Clone` otherwise.
pub struct SlimVec<T> {
    pub(crate) buf: RawBuf<T>,
    pub(crate) len: usize,
}

// SAFETY: `SlimVec<T>` owns its `T`s exactly like `Vec<T>` does.
unsafe impl<T: Send> Send for SlimVec<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for SlimVec<T> {}

/// Drop `n` live values starting at `ptr`. No-op for types without drop glue.
///
/// # Safety
///
/// `[ptr, ptr + n)` must be live values that are not used afterwards.
#[inline]
pub(crate) unsafe fn destroy<T>(ptr: *mut T, n: usize) {
    if mem::needs_drop::<T>() {
        // SAFETY: forwarded from the caller.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, n)) };
    }
}

/// One more value equal to `value`: a byte copy for trivial elements, a
/// `clone()` otherwise.
#[inline]
fn duplicate<T: Element>(value: &T) -> T {
    if is_trivial::<T>() {
        // SAFETY: trivial classes only exist for `Copy` types.
        unsafe { ptr::read(value) }
    } else {
        value.clone()
    }
}

impl<T> SlimVec<T> {
    /// An empty container. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// An empty container with room for at least `n` elements.
    ///
    /// The capacity is `good_size(n)`, so `with_capacity(0)` does not
    /// allocate.
    pub fn with_capacity(n: usize) -> Self {
        let mut vec = Self::new();
        vec.reserve(n);
        vec
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Whether there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` are live and the pointer is aligned and non-null.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` is exclusive.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Base pointer of the storage. Dangling when nothing is allocated.
    ///
    /// Invalidated by any call that may grow the container.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Mutable base pointer of the storage.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Reference to the element at `idx` without a bounds check.
    ///
    /// # Safety
    ///
    /// `idx < self.len()`. Checked only in debug builds.
    #[inline]
    pub unsafe fn at_unchecked(&self, idx: usize) -> &T {
        debug_assert!(idx < self.len, "index {idx} out of range for length {}", self.len);
        // SAFETY: forwarded from the caller.
        unsafe { &*self.buf.ptr().add(idx) }
    }

    /// Mutable reference to the element at `idx` without a bounds check.
    ///
    /// # Safety
    ///
    /// `idx < self.len()`. Checked only in debug builds.
    #[inline]
    pub unsafe fn at_unchecked_mut(&mut self, idx: usize) -> &mut T {
        debug_assert!(idx < self.len, "index {idx} out of range for length {}", self.len);
        // SAFETY: forwarded from the caller.
        unsafe { &mut *self.buf.ptr().add(idx) }
    }

    /// Ensure `capacity() >= n`.
    ///
    /// `n` is an absolute slot count, not an increment. A no-op when the
    /// capacity already suffices; otherwise the storage is reallocated to
    /// `good_size(n)` and every element moves.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow. Allocator failure aborts.
    pub fn reserve(&mut self, n: usize) {
        if n > self.buf.capacity() {
            self.grow_to(n);
        }
    }

    #[cold]
    #[inline(never)]
    fn grow_to(&mut self, n: usize) {
        let new_cap = good_size(n);
        // SAFETY: `len <= capacity < n < new_cap`.
        unsafe { self.buf.relocate(self.len, new_cap) };
    }

    /// Fallible form of [`reserve`](Self::reserve).
    ///
    /// On error the container is unchanged.
    pub fn try_reserve(&mut self, n: usize) -> Result<(), SlimVecError> {
        if n <= self.buf.capacity() {
            return Ok(());
        }
        let overflow = SlimVecError::CapacityOverflow { requested: n };
        let new_cap = checked_good_size(n).ok_or_else(|| overflow.clone())?;
        // SAFETY: `len <= capacity < n < new_cap`.
        unsafe { self.buf.try_relocate(self.len, new_cap) }.map_err(|err| match err {
            SlimVecError::CapacityOverflow { .. } => overflow,
            other => other,
        })
    }

    /// Append `value`, growing if needed.
    #[inline]
    pub fn push(&mut self, value: T) {
        if self.len == self.buf.capacity() {
            self.reserve(self.len.checked_add(1).unwrap_or_else(|| capacity_overflow()));
        }
        // SAFETY: slot `len` is allocated and uninitialised.
        unsafe { self.buf.ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside the live range.
        Some(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Destroy the last element.
    ///
    /// The container must not be empty. This is checked in debug builds;
    /// in release builds an empty container is left unchanged.
    pub fn pop_back(&mut self) {
        debug_assert!(self.len > 0, "pop_back on an empty SlimVec");
        if self.len > 0 {
            self.len -= 1;
            // SAFETY: slot `len` was live and is now outside the live range.
            unsafe { destroy(self.buf.ptr().add(self.len), 1) };
        }
    }

    /// Move `value` in before position `pos`. Returns `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`.
    pub fn insert_value(&mut self, pos: usize, value: T) -> usize {
        Gap::open(self, pos, 1).push(value);
        pos
    }

    /// Remove and return the element at `pos`, shifting the tail down.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len`.
    pub fn remove(&mut self, pos: usize) -> T {
        let len = self.len;
        assert!(pos < len, "removal index (is {pos}) should be < len (is {len})");
        // SAFETY: `pos` is live; the tail `(pos, len)` is shifted over it and
        // the last slot leaves the live range.
        unsafe {
            let p = self.buf.ptr().add(pos);
            let value = p.read();
            ptr::copy(p.add(1), p, len - pos - 1);
            self.len = len - 1;
            value
        }
    }

    /// Remove the element at `pos`. A no-op when `pos == len`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`.
    pub fn erase(&mut self, pos: usize) {
        if pos != self.len {
            self.erase_range(pos..pos + 1);
        }
    }

    /// Remove the elements in `range`, shifting the tail down.
    ///
    /// Never reallocates; capacity is unchanged.
    ///
    /// # Panics
    ///
    /// Panics unless `range.start <= range.end <= len`.
    pub fn erase_range(&mut self, range: Range<usize>) {
        let Range { start, end } = range;
        let len = self.len;
        assert!(start <= end, "erase range starts at {start} but ends at {end}");
        assert!(end <= len, "erase range end (is {end}) should be <= len (is {len})");
        let n = end - start;
        // Hide the tail while destructors run; it leaks rather than
        // double-drops if one of them panics.
        self.len = start;
        // SAFETY: `[start, end)` is live and leaves the live range; the tail
        // `[end, len)` is moved down over it.
        unsafe {
            let p = self.buf.ptr();
            destroy(p.add(start), n);
            ptr::copy(p.add(end), p.add(start), len - end);
        }
        self.len = len - n;
    }

    /// Destroy the elements past `n`. A no-op when `n >= len`.
    pub fn truncate(&mut self, n: usize) {
        if n >= self.len {
            return;
        }
        let tail = self.len - n;
        self.len = n;
        // SAFETY: `[n, n + tail)` was live and is now outside the live range.
        unsafe { destroy(self.buf.ptr().add(n), tail) };
    }

    /// Destroy all elements. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchange contents with `other` in O(1).
    ///
    /// Shadows the slice method; swap two elements with
    /// `as_mut_slice().swap(a, b)`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }
}

impl<T: Element> SlimVec<T> {
    /// `n` duplicates of `value`.
    pub fn from_elem(n: usize, value: &T) -> Self {
        let mut vec = Self::new();
        vec.insert_n(0, n, value);
        vec
    }

    /// Duplicates of every element of `src`.
    pub fn from_slice(src: &[T]) -> Self {
        let mut vec = Self::new();
        vec.insert_slice(0, src);
        vec
    }

    /// Append a duplicate of `value`.
    pub fn push_back(&mut self, value: &T) {
        self.push(duplicate(value));
    }

    /// Append duplicates of every element of `src`.
    pub fn extend_from_slice(&mut self, src: &[T]) {
        self.insert_slice(self.len, src);
    }

    /// Insert a duplicate of `value` before position `pos`. Returns `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`.
    pub fn insert(&mut self, pos: usize, value: &T) -> usize {
        self.insert_n(pos, 1, value)
    }

    /// Insert `n` duplicates of `value` before position `pos`. Returns `pos`.
    ///
    /// Elements previously at `[pos, len)` end up at `[pos + n, len + n)`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`. If `Clone` panics part way, the container is
    /// restored to its previous contents before unwinding continues.
    pub fn insert_n(&mut self, pos: usize, n: usize, value: &T) -> usize {
        let mut gap = Gap::open(self, pos, n);
        for _ in 0..n {
            gap.push(duplicate(value));
        }
        pos
    }

    /// Insert duplicates of `src` before position `pos`. Returns `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`. Panic behaviour of `Clone` as for
    /// [`insert_n`](Self::insert_n).
    pub fn insert_slice(&mut self, pos: usize, src: &[T]) -> usize {
        let mut gap = Gap::open(self, pos, src.len());
        if is_trivial::<T>() {
            // SAFETY: trivial classes only exist for `Copy` types, and `src`
            // cannot alias the container's storage while `gap` borrows it.
            unsafe { gap.copy_from(src) };
        } else {
            for item in src {
                gap.push(item.clone());
            }
        }
        pos
    }
}

impl<T: Element + Default> SlimVec<T> {
    /// Make `len() == n`, appending `T::default()` values or destroying
    /// trailing elements.
    pub fn resize(&mut self, n: usize) {
        if n <= self.len {
            self.truncate(n);
            return;
        }
        self.reserve(n);
        if is_trivial::<T>() {
            let value = T::default();
            while self.len < n {
                // SAFETY: slot `len` is allocated and uninitialised.
                unsafe { self.buf.ptr().add(self.len).write(duplicate(&value)) };
                self.len += 1;
            }
        } else {
            while self.len < n {
                // SAFETY: as above; `len` only advances after the write so a
                // panicking `default()` leaves the live range intact.
                unsafe { self.buf.ptr().add(self.len).write(T::default()) };
                self.len += 1;
            }
        }
    }
}

/// An open gap of `n` uninitialised slots at `pos`, with the former tail
/// parked at `pos + n`.
///
/// Dropping the gap commits the insertion once all `n` slots are filled.
/// Dropped early (a panicking `Clone`), it destroys what was written and
/// moves the tail back, so the container keeps its previous contents.
struct Gap<'a, T> {
    vec: &'a mut SlimVec<T>,
    pos: usize,
    n: usize,
    tail: usize,
    filled: usize,
}

impl<'a, T> Gap<'a, T> {
    fn open(vec: &'a mut SlimVec<T>, pos: usize, n: usize) -> Self {
        let len = vec.len;
        assert!(pos <= len, "insertion index (is {pos}) should be <= len (is {len})");
        vec.reserve(len.checked_add(n).unwrap_or_else(|| capacity_overflow()));
        let tail = len - pos;
        // SAFETY: capacity >= len + n, so the tail fits at `pos + n`.
        unsafe {
            let p = vec.buf.ptr().add(pos);
            ptr::copy(p, p.add(n), tail);
        }
        vec.len = pos;
        Self {
            vec,
            pos,
            n,
            tail,
            filled: 0,
        }
    }

    fn push(&mut self, value: T) {
        debug_assert!(self.filled < self.n);
        // SAFETY: `pos + filled` lies inside the gap and is uninitialised.
        unsafe { self.vec.buf.ptr().add(self.pos + self.filled).write(value) };
        self.filled += 1;
    }

    /// Byte-copy `src` into the remainder of the gap.
    ///
    /// # Safety
    ///
    /// `T` must be `Copy`, `src` must fit and must not overlap the gap.
    unsafe fn copy_from(&mut self, src: &[T]) {
        debug_assert!(self.filled + src.len() <= self.n);
        // SAFETY: forwarded from the caller.
        unsafe {
            let dst = self.vec.buf.ptr().add(self.pos + self.filled);
            ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
        }
        self.filled += src.len();
    }
}

impl<T> Drop for Gap<'_, T> {
    fn drop(&mut self) {
        let p = self.vec.buf.ptr();
        if self.filled == self.n {
            self.vec.len = self.pos + self.n + self.tail;
            return;
        }
        // SAFETY: `[pos, pos + filled)` holds the values written so far and
        // the tail sits at `pos + n`; it moves back to `pos`.
        unsafe {
            destroy(p.add(self.pos), self.filled);
            ptr::copy(p.add(self.pos + self.n), p.add(self.pos), self.tail);
        }
        self.vec.len = self.pos + self.tail;
    }
}

impl<T> Drop for SlimVec<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is live; `buf` frees the storage afterwards.
        unsafe { destroy(self.buf.ptr(), self.len) };
    }
}

impl<T> Default for SlimVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Clone for SlimVec<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self)
    }

    /// Copy-then-swap: `self` is only touched once the copy is complete.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Deref for SlimVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SlimVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for SlimVec<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for SlimVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for SlimVec<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for SlimVec<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for SlimVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: ByteEq> SlimVec<T> {
    fn as_bytes(&self) -> &[u8] {
        // SAFETY: `ByteEq` types have no padding or uninitialised bytes.
        unsafe {
            slice::from_raw_parts(
                self.as_ptr().cast::<u8>(),
                mem::size_of_val(self.as_slice()),
            )
        }
    }
}

/// Byte-wise equality of the live ranges.
///
/// Only offered for [`ByteEq`] elements: for other types, equal values may
/// have different bytes.
impl<T: ByteEq> PartialEq for SlimVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_bytes() == other.as_bytes()
    }
}

impl<T: ByteEq> Eq for SlimVec<T> {}

/// Lexicographic by element `<`; on a common prefix the shorter is less.
impl<T: ByteEq + PartialOrd> PartialOrd for SlimVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        for (a, b) in self.iter().zip(other.iter()) {
            if a < b {
                return Some(Ordering::Less);
            }
            if b < a {
                return Some(Ordering::Greater);
            }
        }
        Some(self.len.cmp(&other.len))
    }
}

impl<T: ByteEq + Ord> Ord for SlimVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.iter().zip(other.iter()) {
            match a.cmp(b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        self.len.cmp(&other.len)
    }
}

impl<T: Hash> Hash for SlimVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Extend<T> for SlimVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len.saturating_add(lower));
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Element + 'a> Extend<&'a T> for SlimVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(duplicate));
    }
}

impl<T> FromIterator<T> for SlimVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T: Element> From<&[T]> for SlimVec<T> {
    fn from(src: &[T]) -> Self {
        Self::from_slice(src)
    }
}

impl<T, const N: usize> From<[T; N]> for SlimVec<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a SlimVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SlimVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
