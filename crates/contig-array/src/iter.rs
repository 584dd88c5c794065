//! Iteration and collection traits.
//!
//! Borrowing iteration goes through the slice (`iter`, `iter_mut`);
//! [`IntoIter`] is the owning iterator.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::slice;

use contig_core::Relocation;
use contig_raw::RawBuffer;

use crate::array::DynamicArray;

/// Owning iterator over the elements of a [`DynamicArray`].
///
/// Holds the array's storage; slots `[front, back)` are still live.
/// Dropping the iterator drops the remaining elements and releases the
/// allocation.
pub struct IntoIter<T> {
    storage: RawBuffer<T>,
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [front, back) is live and within the allocation.
        unsafe { slice::from_raw_parts(self.storage.slot(self.front), self.back - self.front) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let slot = self.storage.slot(self.front);
        self.front += 1;
        // SAFETY: the slot was live and is now outside [front, back).
        Some(unsafe { slot.read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: the slot was live and is now outside [front, back).
        Some(unsafe { self.storage.slot(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            self.storage.slot_mut(self.front),
            self.back - self.front,
        );
        // SAFETY: [front, back) holds the elements never yielded.
        unsafe { ptr::drop_in_place(remaining) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, R> IntoIterator for DynamicArray<T, R> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let storage = self.storage.take();
        let back = self.len;
        // The storage moved out; nothing is left for `self` to drop.
        self.len = 0;
        IntoIter {
            storage,
            front: 0,
            back,
        }
    }
}

impl<'a, T, R> IntoIterator for &'a DynamicArray<T, R> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, R> IntoIterator for &'a mut DynamicArray<T, R> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, R: Relocation<T>> Extend<T> for DynamicArray<T, R> {
    /// Appends each item with [`push_back`](DynamicArray::push_back), so
    /// capacity follows the growth policy.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, R: Relocation<T>> FromIterator<T> for DynamicArray<T, R> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::empty();
        arr.extend(iter);
        arr
    }
}
