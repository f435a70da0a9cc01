//! A small growable array with a byte-copy fast path for plain-data
//! elements.
//!
//! [`SlimVec<T>`] is a contiguous, heap-backed sequence for code that
//! wants a predictable growth curve and tight control over how elements
//! are duplicated, without depending on every `Vec` feature.
//!
//! # Architecture
//!
//! ```text
//! SlimVec<T>
//! ├── RawBuf<T>        (owns the allocation; relocates on growth)
//! ├── len              (live prefix [0, len))
//! └── Element::CLASS   (compile-time: byte copy vs Clone/Drop)
//! ```
//!
//! # Growth
//!
//! When an operation needs `need > capacity` slots, the buffer is
//! reallocated to [`growth::good_size`]`(need) = 2 << floor(log2(need))`.
//! Appending one element at a time from empty observes capacities
//! 2, 4, 8, 16, ... Capacity never shrinks.
//!
//! # Element classes
//!
//! Element types implement [`Element`]. Those classified
//! [`ElementClass::TRIVIAL`] (only possible for `Copy` types) are duplicated
//! by raw byte copy in `push_back`, `insert*`, `resize` and `clone`; all
//! others go through `Clone` one element at a time. Types with
//! [`ByteEq`] additionally get byte-wise `==` and lexicographic ordering on
//! whole containers.
//!
//! ```
//! use slimvec::SlimVec;
//!
//! let mut v = SlimVec::new();
//! v.push(1u32);
//! v.push(2);
//! v.insert(1, &7);
//! assert_eq!(v.as_slice(), &[1, 7, 2]);
//! assert_eq!(v.capacity(), 4);
//!
//! v.erase(0);
//! assert_eq!(v, SlimVec::from([7, 2]));
//! ```
//!
//! # Unchecked access
//!
//! Indexing (`v[i]`) is bounds checked through the slice. The unchecked
//! variants are [`SlimVec::at_unchecked`] / [`SlimVec::at_unchecked_mut`],
//! which only assert in debug builds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod element;
pub mod error;
pub mod growth;
pub mod iter;
mod raw;
pub mod vec;

// Public re-exports for the primary API surface.
pub use element::{ByteEq, Element, ElementClass};
pub use error::SlimVecError;
pub use iter::IntoIter;
pub use vec::SlimVec;
