//! Reallocation and element relocation.

use std::ptr;

use contig_core::{AllocError, GrowthPolicy, Relocation};
use contig_raw::RawBuffer;

use crate::array::DynamicArray;
use crate::guard::InitGuard;

/// Transfer `count` live elements from `src` into uninitialised `dst`.
///
/// Under an infallible policy the source slots are logically uninitialised
/// afterwards. Otherwise they are still live and must be handed to
/// [`release_relocated`] once the new state is committed. If a duplicate
/// panics, every element already written to `dst` is dropped and `src` is
/// untouched.
///
/// # Safety
///
/// `src..src+count` must be live, `dst..dst+count` valid uninitialised
/// storage, and the two ranges must not overlap.
pub(crate) unsafe fn relocate<T, R: Relocation<T>>(src: *const T, dst: *mut T, count: usize) {
    if R::INFALLIBLE {
        // SAFETY: guaranteed by the caller.
        unsafe { ptr::copy_nonoverlapping(src, dst, count) };
        return;
    }
    let mut guard = InitGuard::new(dst);
    for i in 0..count {
        // SAFETY: `i < count`, so `src + i` is live and `dst + i` is the next
        // uninitialised destination slot.
        unsafe { guard.push(R::duplicate(&*src.add(i))) };
    }
    guard.disarm();
}

/// Destroy the source of a committed [`relocate`], if it is still live.
///
/// # Safety
///
/// `src..src+count` must be the source range of a completed `relocate`
/// with the same policy, and must not be used again afterwards.
pub(crate) unsafe fn release_relocated<T, R: Relocation<T>>(src: *mut T, count: usize) {
    if !R::INFALLIBLE {
        // SAFETY: under a fallible policy the originals are still live and
        // the caller gives up ownership of them here.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(src, count)) };
    }
}

impl<T, R: Relocation<T>> DynamicArray<T, R> {
    /// Ensure capacity for at least `capacity` elements.
    ///
    /// A request at or below the current capacity is a no-op. Otherwise
    /// the storage is reallocated to exactly `capacity` slots; if
    /// relocation fails the array is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow and aborts on allocation failure.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(err) = self.try_reserve(capacity) {
            err.raise();
        }
    }

    /// Fallible form of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), AllocError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.reallocate(capacity)
    }

    /// Capacity the growth policy picks when the storage is full.
    pub(crate) fn grown_capacity(&self) -> Result<usize, AllocError> {
        GrowthPolicy::next_capacity(self.capacity()).ok_or(AllocError::CapacityOverflow)
    }

    /// Move every live element into a fresh allocation of `new_capacity`.
    ///
    /// Two-phase: the new buffer is fully populated before it replaces the
    /// old one, and old elements are released only after the swap.
    fn reallocate(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        debug_assert!(new_capacity >= self.len);
        let mut fresh = RawBuffer::try_with_capacity(new_capacity)?;
        tracing::trace!(
            old_capacity = self.capacity(),
            new_capacity,
            len = self.len,
            "reallocating dynamic array"
        );
        // SAFETY: [0, len) is live in the current storage; `fresh` is a
        // distinct allocation with at least `len` slots.
        unsafe { relocate::<T, R>(self.storage.as_ptr(), fresh.as_mut_ptr(), self.len) };
        self.storage.swap(&mut fresh);
        // SAFETY: `fresh` now owns the old allocation, whose [0, len) was
        // the relocation source. The array no longer refers to it.
        unsafe { release_relocated::<T, R>(fresh.as_mut_ptr(), self.len) };
        Ok(())
    }
}
