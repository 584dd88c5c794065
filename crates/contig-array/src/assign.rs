//! Copy construction and copy assignment.

use std::marker::PhantomData;

use contig_raw::RawBuffer;

use crate::array::DynamicArray;
use crate::guard::InitGuard;

impl<T: Clone, R> Clone for DynamicArray<T, R> {
    /// Deep copy into a fresh allocation of exactly `len` slots.
    fn clone(&self) -> Self {
        let mut storage = RawBuffer::with_capacity(self.len);
        let mut guard = InitGuard::new(storage.as_mut_ptr());
        for item in self.iter() {
            // SAFETY: at most `len` pushes into a `len`-slot buffer.
            unsafe { guard.push(item.clone()) };
        }
        guard.disarm();
        Self {
            storage,
            len: self.len,
            _policy: PhantomData,
        }
    }

    /// Copy-assign from `source`, reusing storage when it is large enough.
    ///
    /// If `source` does not fit, a complete copy is built first and then
    /// swapped in, so a panicking `clone` leaves `self` unchanged.
    /// Otherwise the overlapping prefix is assigned element-wise, then the
    /// excess tail is dropped or the missing suffix is cloned in place;
    /// a panic there leaves a valid but partially assigned array.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }

        let overlap = self.len.min(source.len);
        self.as_mut_slice()[..overlap].clone_from_slice(&source.as_slice()[..overlap]);

        if source.len < self.len {
            self.truncate(source.len);
            return;
        }
        for item in &source.as_slice()[self.len..] {
            // SAFETY: `len < source.len <= capacity`, so the slot is
            // uninitialised storage; `len` grows with each construction.
            unsafe { self.storage.slot_mut(self.len).write(item.clone()) };
            self.len += 1;
        }
    }
}
