//! Growable contiguous array built on [`contig_raw::RawBuffer`].
//!
//! [`DynamicArray`] owns a raw buffer plus a live-element count. All
//! element construction and destruction, the growth policy, and the
//! insert/erase algorithms live here; the buffer only hands out slot
//! addresses.
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T, R>
//! ├── RawBuffer<T>   slots [0, len) live, [len, capacity) uninitialised
//! ├── len: usize
//! └── R: Relocation<T>   Bitwise (default) | Duplicate
//! ```
//!
//! # Failure guarantees
//!
//! Element operations fail by panicking; allocation fails through the
//! `try_*` methods or the standard allocation-failure abort. When a panic
//! unwinds through the array no element is dropped twice and none is
//! leaked. On top of that:
//!
//! - **Strong:** reallocating insert, `reserve`, and `clone_from` when the
//!   source exceeds capacity. On failure the array is exactly as before.
//! - **Basic:** mid-array insert without reallocation, growing `resize`,
//!   `erase` under [`Duplicate`](contig_core::Duplicate). The array stays
//!   valid but its contents may have changed.
//!
//! Outstanding borrows (slices, iterators, `&mut T` returned by inserts)
//! are invalidated by every structural mutation; the borrow checker
//! enforces this.
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `contig-raw`). Every block carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod array;
mod assign;
mod erase;
mod grow;
mod guard;
mod insert;
pub mod iter;
mod resize;

// Public re-exports for the primary API surface.
pub use array::DynamicArray;
pub use contig_core::{AllocError, Bitwise, Duplicate, GrowthPolicy, Relocation};
pub use iter::IntoIter;
