//! Owned, untyped-content storage for [`SlimVec`](crate::SlimVec).
//!
//! [`RawBuf`] owns an allocation of `cap` slots of `T` and nothing else:
//! it never reads, writes or drops elements. The container tracks which
//! slots are live. This is the only module that talks to the allocator.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::SlimVecError;
use crate::growth::capacity_overflow;

/// Exclusive owner of an allocation sized for `cap` values of `T`.
///
/// With `cap == 0`, or for zero-sized `T`, no memory is allocated and the
/// pointer is dangling (but aligned).
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// An empty buffer. Does not allocate.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Base pointer of the allocation.
    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Number of slots the allocation holds.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    /// Move the first `len` slots into a fresh allocation of `new_cap` slots
    /// and release the old one.
    ///
    /// Aborts through `handle_alloc_error` if the allocator fails; panics on
    /// capacity overflow. On either failure the old buffer is untouched.
    ///
    /// # Safety
    ///
    /// `len <= self.capacity()` and `len <= new_cap`.
    pub(crate) unsafe fn relocate(&mut self, len: usize, new_cap: usize) {
        let new_ptr = Self::allocate(new_cap);
        // SAFETY: forwarded from the caller.
        unsafe { self.install(new_ptr, len, new_cap) };
    }

    /// Fallible form of [`relocate`](Self::relocate).
    ///
    /// # Safety
    ///
    /// `len <= self.capacity()` and `len <= new_cap`.
    pub(crate) unsafe fn try_relocate(
        &mut self,
        len: usize,
        new_cap: usize,
    ) -> Result<(), SlimVecError> {
        let new_ptr = Self::try_allocate(new_cap)?;
        // SAFETY: forwarded from the caller.
        unsafe { self.install(new_ptr, len, new_cap) };
        Ok(())
    }

    /// Copy `len` slots into `new_ptr`, free the old block, adopt the new one.
    ///
    /// # Safety
    ///
    /// `new_ptr` is a fresh allocation of `new_cap` slots, `len` fits in both.
    unsafe fn install(&mut self, new_ptr: NonNull<T>, len: usize, new_cap: usize) {
        debug_assert!(len <= self.cap && len <= new_cap);
        // SAFETY: both regions hold at least `len` slots and belong to
        // distinct allocations (or are zero-sized).
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len) };
        log::trace!(
            "slimvec: relocated {len} live of {} -> {new_cap} slots ({} bytes each)",
            self.cap,
            mem::size_of::<T>()
        );
        self.release();
        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    fn layout(cap: usize) -> Option<Layout> {
        Layout::array::<T>(cap).ok()
    }

    fn allocate(cap: usize) -> NonNull<T> {
        let layout = match Self::layout(cap) {
            Some(layout) => layout,
            None => capacity_overflow(),
        };
        if layout.size() == 0 {
            return NonNull::dangling();
        }
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(ptr.cast::<T>()) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(layout),
        }
    }

    fn try_allocate(cap: usize) -> Result<NonNull<T>, SlimVecError> {
        let layout =
            Self::layout(cap).ok_or(SlimVecError::CapacityOverflow { requested: cap })?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr.cast::<T>()).ok_or(SlimVecError::AllocFailed {
            bytes: layout.size(),
            align: layout.align(),
        })
    }

    /// Free the allocation, if any. Leaves `self` dangling with `cap == 0`.
    fn release(&mut self) {
        let bytes = mem::size_of::<T>() * self.cap;
        if bytes != 0 {
            // SAFETY: this exact layout was validated by `Layout::array` when
            // the block was allocated.
            let layout = unsafe { Layout::from_size_align_unchecked(bytes, mem::align_of::<T>()) };
            // SAFETY: `ptr` came from `alloc::alloc` with `layout`.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_allocate() {
        let buf = RawBuf::<u64>::new();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.ptr(), NonNull::<u64>::dangling().as_ptr());
    }

    #[test]
    fn relocate_preserves_live_prefix() {
        let mut buf = RawBuf::<u32>::new();
        unsafe { buf.relocate(0, 4) };
        assert_eq!(buf.capacity(), 4);
        for i in 0..3 {
            unsafe { buf.ptr().add(i).write(i as u32 * 10) };
        }
        let old = buf.ptr();
        unsafe { buf.relocate(3, 16) };
        assert_eq!(buf.capacity(), 16);
        assert_ne!(buf.ptr(), old);
        let live = unsafe { std::slice::from_raw_parts(buf.ptr(), 3) };
        assert_eq!(live, &[0, 10, 20]);
    }

    #[test]
    fn zero_sized_never_allocates() {
        let mut buf = RawBuf::<()>::new();
        unsafe { buf.relocate(0, 8) };
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.ptr(), NonNull::<()>::dangling().as_ptr());
    }

    #[test]
    fn try_relocate_rejects_oversized_layout() {
        let mut buf = RawBuf::<u64>::new();
        let err = unsafe { buf.try_relocate(0, usize::MAX / 4) }.unwrap_err();
        assert_eq!(
            err,
            SlimVecError::CapacityOverflow {
                requested: usize::MAX / 4
            }
        );
        assert_eq!(buf.capacity(), 0);
    }
}
