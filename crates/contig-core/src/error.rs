//! Allocation error types.
//!
//! Element constructors report failure by panicking; only the allocator
//! path produces a recoverable error value. Infallible entry points turn
//! these into the same aborts the standard library uses.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors that can occur when acquiring backing storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested capacity does not fit in a valid `Layout`
    /// (byte size would exceed `isize::MAX`, or the element count
    /// overflowed while growing).
    CapacityOverflow,
    /// The global allocator returned null for a valid layout.
    OutOfMemory {
        /// The layout that could not be satisfied.
        layout: Layout,
    },
}

impl AllocError {
    /// Diverge the way the standard collections do on allocation failure.
    ///
    /// `CapacityOverflow` panics with `"capacity overflow"`;
    /// `OutOfMemory` calls [`std::alloc::handle_alloc_error`].
    pub fn raise(self) -> ! {
        match self {
            Self::CapacityOverflow => panic!("capacity overflow"),
            Self::OutOfMemory { layout } => std::alloc::handle_alloc_error(layout),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::OutOfMemory { layout } => {
                write!(
                    f,
                    "out of memory: failed to allocate {} bytes (align {})",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for AllocError {}
