//! Insertion: `emplace_with` and the helpers built on it.

use std::ptr;

use contig_core::{AllocError, Relocation};
use contig_raw::RawBuffer;

use crate::array::DynamicArray;
use crate::grow::{release_relocated, relocate};
use crate::guard::InitGuard;

impl<T, R: Relocation<T>> DynamicArray<T, R> {
    /// Construct an element from `make` and insert it before `pos`.
    ///
    /// Returns a reference to the inserted element.
    ///
    /// When the storage is full, a new buffer sized by the growth policy
    /// is allocated and populated before anything in the array changes, so
    /// a panic from `make` or from relocation leaves the array untouched.
    /// When there is spare capacity and `pos < len`, the tail is shifted
    /// in place; under [`Duplicate`](contig_core::Duplicate) a panic during
    /// that shift can leave the tail partially shifted (no element is lost
    /// or dropped twice).
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`, on capacity overflow, and if `make` panics.
    pub fn emplace_with<F>(&mut self, pos: usize, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_with(pos, make) {
            Ok(inserted) => inserted,
            Err(err) => err.raise(),
        }
    }

    /// Fallible form of [`emplace_with`](Self::emplace_with).
    ///
    /// Returns the allocation error without calling `make` if a required
    /// reallocation fails.
    pub fn try_emplace_with<F>(&mut self, pos: usize, make: F) -> Result<&mut T, AllocError>
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        assert!(
            pos <= len,
            "insertion index (is {pos}) should be <= len (is {len})"
        );

        if len < self.capacity() {
            if pos == len {
                // SAFETY: `len < capacity`, so the slot is uninitialised storage.
                unsafe { self.storage.slot_mut(len).write(make()) };
                self.len += 1;
            } else {
                let value = make();
                self.shift_in(pos, value);
            }
        } else {
            self.grow_and_insert(pos, make)?;
        }

        // SAFETY: `pos < len` after a successful insert.
        Ok(unsafe { &mut *self.storage.slot_mut(pos) })
    }

    /// Insert `value` before `pos`. See [`emplace_with`](Self::emplace_with).
    pub fn insert(&mut self, pos: usize, value: T) -> &mut T {
        self.emplace_with(pos, || value)
    }

    /// Append `value`.
    pub fn push_back(&mut self, value: T) {
        let len = self.len;
        self.emplace_with(len, || value);
    }

    /// Fallible form of [`push_back`](Self::push_back). On error `value` is
    /// dropped and the array is unchanged.
    pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
        let len = self.len;
        self.try_emplace_with(len, || value).map(|_| ())
    }

    /// Construct an element from `make` at the end. Returns a reference
    /// to it.
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        self.emplace_with(len, make)
    }

    /// Spare-capacity insert before the last element.
    ///
    /// The last element moves into the one-past-end slot, the rest of the
    /// tail shifts right by one, then `value` lands in `pos`.
    fn shift_in(&mut self, pos: usize, value: T) {
        let len = self.len;
        debug_assert!(pos < len && len < self.capacity());
        let base = self.storage.as_mut_ptr();

        if R::INFALLIBLE {
            // SAFETY: [pos, len) is live and [pos+1, len+1) is within
            // capacity; `ptr::copy` handles the overlap. The stale copy left
            // at `pos` is overwritten without being dropped.
            unsafe {
                let hole = base.add(pos);
                ptr::copy(hole, hole.add(1), len - pos);
                hole.write(value);
            }
            self.len += 1;
            return;
        }

        // SAFETY: `len - 1` is live and `len < capacity` is uninitialised.
        unsafe { base.add(len).write(R::duplicate(&*base.add(len - 1))) };
        self.len += 1;
        for i in (pos + 1..len).rev() {
            // SAFETY: both `i` and `i - 1` are live. Assignment drops the
            // old value at `i`, which was duplicated one step earlier.
            unsafe { *base.add(i) = R::duplicate(&*base.add(i - 1)) };
        }
        // SAFETY: `pos` is live; its old value now also lives at `pos + 1`.
        unsafe { *base.add(pos) = value };
    }

    /// Full-storage insert: build the grown buffer around the new element,
    /// then commit.
    fn grow_and_insert<F>(&mut self, pos: usize, make: F) -> Result<(), AllocError>
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        let new_capacity = self.grown_capacity()?;
        let mut fresh = RawBuffer::<T>::try_with_capacity(new_capacity)?;
        tracing::trace!(
            old_capacity = self.capacity(),
            new_capacity,
            len,
            pos,
            "growing dynamic array for insert"
        );

        let src = self.storage.as_ptr();
        let dst = fresh.as_mut_ptr();
        // SAFETY: `fresh` has `len + 1 <= new_capacity` uninitialised
        // slots and is disjoint from the current storage. Guards drop
        // whatever has been built in `fresh` if a later step panics; the
        // current storage is only read.
        unsafe {
            dst.add(pos).write(make());
            let inserted = InitGuard::covering(dst.add(pos), 1);
            relocate::<T, R>(src, dst, pos);
            inserted.disarm();

            let front = InitGuard::covering(dst, pos + 1);
            relocate::<T, R>(src.add(pos), dst.add(pos + 1), len - pos);
            front.disarm();
        }

        self.storage.swap(&mut fresh);
        self.len += 1;
        // SAFETY: `fresh` owns the old allocation; [0, len) was the
        // relocation source and the array no longer refers to it.
        unsafe { release_relocated::<T, R>(fresh.as_mut_ptr(), len) };
        Ok(())
    }
}
