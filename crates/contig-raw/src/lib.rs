//! Raw storage for contiguous containers.
//!
//! [`RawBuffer`] owns a single allocation sized for `capacity` values of
//! `T` and nothing more: it never constructs, reads, or drops elements.
//! Tracking which slots hold live values is the caller's job. This crate
//! is one of two that may contain `unsafe` code (along with
//! `contig-array`), and all of it lives in `raw.rs`.
//!
//! # Ownership
//!
//! ```text
//! RawBuffer<T>
//! ├── ptr: NonNull<T>       (dangling when nothing is allocated)
//! └── capacity: usize       (slots, not bytes)
//! ```
//!
//! Exactly one `RawBuffer` owns any allocation. It is not `Clone`;
//! ownership moves with [`RawBuffer::take`] or [`RawBuffer::swap`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod raw;

pub use contig_core::AllocError;
pub use raw::RawBuffer;
