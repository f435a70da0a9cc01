//! Owning iterator.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::mem::ManuallyDrop;
use std::ptr;
use std::slice;

use crate::raw::RawBuf;
use crate::vec::{destroy, SlimVec};

/// Moves elements out of a [`SlimVec`], front to back.
///
/// Elements not consumed are destroyed when the iterator is dropped, and the
/// storage is released with it.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

// SAFETY: same ownership as `SlimVec<T>`.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` is still live.
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start` is live and leaves the live range.
        let value = unsafe { self.buf.ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: `[start, end)` was never yielded.
        unsafe { destroy(self.buf.ptr().add(self.start), self.end - self.start) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for SlimVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let vec = ManuallyDrop::new(self);
        // SAFETY: `vec` is never dropped, so ownership of the buffer and its
        // live elements passes to the iterator exactly once.
        let buf = unsafe { ptr::read(&vec.buf) };
        IntoIter {
            buf,
            start: 0,
            end: vec.len,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::SlimVec;
    use std::rc::Rc;

    #[test]
    fn yields_in_order() {
        let vec = SlimVec::from([1, 2, 3]);
        let out: Vec<i32> = vec.into_iter().collect();
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn exact_size() {
        let mut iter = SlimVec::from(['a', 'b']).into_iter();
        assert_eq!(iter.len(), 2);
        iter.next();
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.as_slice(), &['b']);
        iter.next();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn unconsumed_elements_are_dropped() {
        let shared = Rc::new(());
        let vec: SlimVec<Rc<()>> = (0..4).map(|_| Rc::clone(&shared)).collect();
        assert_eq!(Rc::strong_count(&shared), 5);
        let mut iter = vec.into_iter();
        let first = iter.next();
        drop(iter);
        assert_eq!(Rc::strong_count(&shared), 2);
        drop(first);
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn empty_vec_iterates_nothing() {
        let vec = SlimVec::<String>::new();
        assert_eq!(vec.into_iter().count(), 0);
    }
}
