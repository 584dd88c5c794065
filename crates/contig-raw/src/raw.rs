//! Allocation owner for uninitialised element storage.
//!
//! Every `unsafe` block in this crate lives here, each with a
//! `// SAFETY:` comment. Zero-sized element types and zero capacity
//! never reach the allocator.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use contig_core::AllocError;

/// Owner of an uninitialised allocation for `capacity` values of `T`.
///
/// The buffer treats its memory as opaque: dropping a `RawBuffer`
/// releases the allocation without running any destructor. Callers
/// must drop live elements first.
pub struct RawBuffer<T> {
    /// Start of the allocation. Dangling (but aligned) when nothing
    /// was allocated.
    ptr: NonNull<T>,
    /// Number of `T` slots the allocation can hold.
    capacity: usize,
    _owns: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    /// An empty buffer with zero capacity. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate room for exactly `capacity` elements.
    ///
    /// No element is constructed. A zero capacity performs no allocator
    /// call.
    ///
    /// # Panics
    ///
    /// Panics with `"capacity overflow"` if the byte size exceeds
    /// `isize::MAX`, and aborts through [`alloc::handle_alloc_error`] if
    /// the allocator fails.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(buffer) => buffer,
            Err(err) => err.raise(),
        }
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            });
        }
        tracing::trace!(
            capacity,
            bytes = layout.size(),
            align = layout.align(),
            "allocating raw buffer"
        );
        // SAFETY: `layout` has a non-zero size (checked above).
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(AllocError::OutOfMemory { layout })?;
        Ok(Self {
            ptr,
            capacity,
            _owns: PhantomData,
        })
    }

    /// Number of element slots in the allocation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The owned allocation, or `None` when the capacity is zero.
    pub fn address(&self) -> Option<NonNull<T>> {
        (self.capacity > 0).then_some(self.ptr)
    }

    /// Start of the storage. Always non-null and aligned, so it is valid
    /// for zero-length slices even when nothing is allocated.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable start of the storage.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of slot `offset`.
    ///
    /// `offset == capacity` is allowed and yields the one-past-end address.
    /// Larger offsets are a caller bug, caught only by a debug assertion.
    /// The slot may be uninitialised; dereferencing it is the caller's
    /// responsibility.
    pub fn slot(&self, offset: usize) -> *const T {
        debug_assert!(
            offset <= self.capacity,
            "slot {offset} out of range for capacity {}",
            self.capacity
        );
        self.ptr.as_ptr().wrapping_add(offset)
    }

    /// Mutable address of slot `offset`. Same contract as [`slot`](Self::slot).
    pub fn slot_mut(&mut self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.capacity,
            "slot {offset} out of range for capacity {}",
            self.capacity
        );
        self.ptr.as_ptr().wrapping_add(offset)
    }

    /// Exchange allocations with `other` in O(1). Contents are untouched.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the allocation out, leaving `self` empty with zero capacity.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Layout to hand back to the allocator, if anything was allocated.
    fn allocated_layout(&self) -> Option<Layout> {
        if self.capacity == 0 || mem::size_of::<T>() == 0 {
            return None;
        }
        // Already validated by `try_with_capacity`.
        Layout::array::<T>(self.capacity).ok()
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if let Some(layout) = self.allocated_layout() {
            // SAFETY: `ptr` was returned by `alloc::alloc` with exactly this
            // layout and has not been released (ownership is unique).
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl<T> fmt::Debug for RawBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("address", &self.address())
            .field("capacity", &self.capacity)
            .finish()
    }
}
