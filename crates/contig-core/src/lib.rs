//! Core types and traits for the contig workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by the raw storage layer and the typed
//! container: allocation errors, the growth policy, and the relocation
//! capability trait that decides how elements move between buffers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;
pub mod relocation;

pub use error::AllocError;
pub use growth::GrowthPolicy;
pub use relocation::{Bitwise, Duplicate, Relocation};
