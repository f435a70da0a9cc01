//! Test utilities and instrumented element types for SlimVec development.
//!
//! Provides element types that record how the container treats them:
//!
//! - [`Tracked`]: non-trivial element that reports every construction,
//!   clone and drop to a shared [`Ledger`], and can be armed to panic
//!   inside `Clone`.
//! - [`Pixel`]: trivial, byte-comparable plain-data element.
//!
//! and [`fixtures`] for building common starting containers.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;
use std::rc::Rc;

use slimvec::{ByteEq, Element, ElementClass};

/// Shared counters for [`Tracked`] values.
#[derive(Debug, Default)]
pub struct Ledger {
    created: Cell<usize>,
    clones: Cell<usize>,
    drops: Cell<usize>,
    clones_until_panic: Cell<Option<usize>>,
}

impl Ledger {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Values constructed with [`Tracked::new`] or by cloning.
    pub fn created(&self) -> usize {
        self.created.get()
    }

    pub fn clones(&self) -> usize {
        self.clones.get()
    }

    pub fn drops(&self) -> usize {
        self.drops.get()
    }

    /// Values created and not yet dropped.
    pub fn live(&self) -> usize {
        self.created.get() - self.drops.get()
    }

    /// Make the `n`-th clone from now panic (`n == 0`: the next one).
    pub fn panic_after_clones(&self, n: usize) {
        self.clones_until_panic.set(Some(n));
    }

    fn bump(cell: &Cell<usize>) {
        cell.set(cell.get() + 1);
    }
}

/// Non-trivial element whose lifecycle is recorded in a [`Ledger`].
#[derive(Debug)]
pub struct Tracked {
    pub value: i64,
    ledger: Rc<Ledger>,
}

impl Tracked {
    pub fn new(value: i64, ledger: &Rc<Ledger>) -> Self {
        Ledger::bump(&ledger.created);
        Self {
            value,
            ledger: Rc::clone(ledger),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if let Some(left) = self.ledger.clones_until_panic.get() {
            if left == 0 {
                self.ledger.clones_until_panic.set(None);
                panic!("Tracked::clone armed to panic");
            }
            self.ledger.clones_until_panic.set(Some(left - 1));
        }
        Ledger::bump(&self.ledger.clones);
        Tracked::new(self.value, &self.ledger)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        Ledger::bump(&self.ledger.drops);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Element for Tracked {}

/// Plain-data element: four bytes, no padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(C)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn gray(level: u8) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
            a: u8::MAX,
        }
    }
}

impl Element for Pixel {
    const CLASS: ElementClass<Self> = ElementClass::TRIVIAL;
}

// SAFETY: four `u8` fields under `repr(C)` leave no padding, and the derived
// `PartialEq` compares every field.
#[allow(unsafe_code)]
unsafe impl ByteEq for Pixel {}
