//! Length changes: `resize` and `resize_with`.

use contig_core::Relocation;

use crate::array::DynamicArray;
use crate::guard::InitGuard;

impl<T, R: Relocation<T>> DynamicArray<T, R> {
    /// Change the length to `new_len`, filling new slots from `fill`.
    ///
    /// Shrinking drops the tail. Growing reserves exactly `new_len` slots
    /// (see [`reserve`](Self::reserve)) and constructs the new elements in
    /// place. If `fill` panics, the elements it already produced are
    /// dropped and `len` is unchanged; a reallocation that happened first
    /// is kept.
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        let len = self.len;
        if new_len <= len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        let mut guard = InitGuard::new(self.storage.slot_mut(len));
        for _ in len..new_len {
            // SAFETY: capacity >= new_len, so [len, new_len) is
            // uninitialised storage and the guard never runs past it.
            unsafe { guard.push(fill()) };
        }
        guard.disarm();
        self.len = new_len;
    }
}

impl<T: Default, R: Relocation<T>> DynamicArray<T, R> {
    /// Change the length to `new_len`, filling new slots with
    /// `T::default()`.
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}
