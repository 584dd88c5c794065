//! Contig: a growable contiguous array that manages element lifetimes by
//! hand and stays valid when element operations panic.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all contig sub-crates. For most users, adding `contig` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! let mut arr: DynamicArray<String> = DynamicArray::new();
//! arr.push_back("b".to_string());
//! arr.insert(0, "a".to_string());
//! arr.emplace_back(|| "c".to_string());
//! assert_eq!(arr, ["a", "b", "c"].map(String::from));
//!
//! // Growth doubles from one slot.
//! assert_eq!(arr.capacity(), 4);
//!
//! let next = arr.erase(1);
//! assert_eq!(arr[next], "c");
//!
//! // Clone-based relocation for types that must not be moved bitwise.
//! let mut dup = DynamicArray::new_in(Duplicate);
//! dup.extend([1, 2, 3]);
//! assert_eq!(dup.pop_back(), Some(3));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `contig-core` | `AllocError`, `GrowthPolicy`, relocation policies |
//! | [`raw`] | `contig-raw` | `RawBuffer`, uninitialised storage |
//! | [`array`] | `contig-array` | `DynamicArray`, `IntoIter` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Error types, growth policy and relocation policies (`contig-core`).
pub use contig_core as types;

/// Uninitialised storage (`contig-raw`).
///
/// [`raw::RawBuffer`] is the building block for containers that track
/// their own live range; most users never touch it directly.
pub use contig_raw as raw;

/// The growable array (`contig-array`).
///
/// [`array::DynamicArray`] and its owning iterator [`array::IntoIter`].
pub use contig_array as array;

/// Common imports for typical contig usage.
///
/// ```rust
/// use contig::prelude::*;
/// ```
pub mod prelude {
    pub use contig_array::{DynamicArray, IntoIter};
    pub use contig_core::{AllocError, Bitwise, Duplicate, GrowthPolicy, Relocation};
}
