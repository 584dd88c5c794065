//! Removal: `erase`, `pop_back`, `truncate`, `clear`. Never reallocates.

use std::ptr;

use contig_core::Relocation;

use crate::array::DynamicArray;

impl<T, R: Relocation<T>> DynamicArray<T, R> {
    /// Destroy the element at `pos` and shift the tail left by one.
    ///
    /// Returns `pos`, which now indexes the element that followed the
    /// erased one (or equals `len` if the last element was erased).
    /// Capacity is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len`.
    pub fn erase(&mut self, pos: usize) -> usize {
        let len = self.len;
        assert!(pos < len, "erase index (is {pos}) should be < len (is {len})");
        let base = self.storage.as_mut_ptr();

        if R::INFALLIBLE {
            // SAFETY: `pos < len` is live. After reading it out, the tail
            // [pos+1, len) moves down one slot; `len` shrinks before the
            // removed value is dropped so a panicking destructor cannot
            // cause a double drop.
            unsafe {
                let hole = base.add(pos);
                let removed = hole.read();
                ptr::copy(hole.add(1), hole, len - pos - 1);
                self.len -= 1;
                drop(removed);
            }
            return pos;
        }

        for i in pos..len - 1 {
            // SAFETY: `i` and `i + 1` are live. The first assignment drops
            // the erased element; later ones drop values already duplicated
            // one slot to the left.
            unsafe { *base.add(i) = R::duplicate(&*base.add(i + 1)) };
        }
        self.len -= 1;
        // SAFETY: the old last slot is live, has been duplicated to
        // `len - 2`, and is now outside the live range.
        unsafe { ptr::drop_in_place(base.add(len - 1)) };
        pos
    }
}

impl<T, R> DynamicArray<T, R> {
    /// Remove and return the last element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside [0, len), so reading
        // it transfers ownership to the caller.
        Some(unsafe { self.storage.slot(self.len).read() })
    }

    /// Shorten the array to `len` elements, dropping the rest.
    ///
    /// No effect if `len >= self.len()`. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail_len = self.len - len;
        let tail = ptr::slice_from_raw_parts_mut(self.storage.slot_mut(len), tail_len);
        self.len = len;
        // SAFETY: [len, old_len) was live and is now outside the live
        // range, so dropping it here is the only drop.
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drop every element, keeping the storage.
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}
