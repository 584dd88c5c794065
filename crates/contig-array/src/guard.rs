//! Drop guard for partially constructed ranges.

use std::mem;
use std::ptr;

/// Tracks a run of initialised slots starting at `base`.
///
/// If the guard is dropped (normally during unwinding) the tracked
/// elements are destroyed. Once the run is complete, [`disarm`] hands
/// ownership back to the caller.
///
/// [`disarm`]: InitGuard::disarm
pub(crate) struct InitGuard<T> {
    base: *mut T,
    initialized: usize,
}

impl<T> InitGuard<T> {
    /// Start an empty run at `base`.
    pub(crate) fn new(base: *mut T) -> Self {
        Self::covering(base, 0)
    }

    /// Take responsibility for `initialized` live slots at `base`.
    pub(crate) fn covering(base: *mut T, initialized: usize) -> Self {
        Self { base, initialized }
    }

    /// Construct `value` in the next slot and extend the run.
    ///
    /// # Safety
    ///
    /// `base + initialized` must be valid, uninitialised storage for `T`.
    pub(crate) unsafe fn push(&mut self, value: T) {
        // SAFETY: guaranteed by the caller.
        unsafe { self.base.add(self.initialized).write(value) };
        self.initialized += 1;
    }

    /// Stop tracking and return how many slots were initialised.
    pub(crate) fn disarm(self) -> usize {
        let initialized = self.initialized;
        mem::forget(self);
        initialized
    }
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialized` slots from `base` were written via
        // `push` (or handed over in `covering`) and nobody else owns them.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.base, self.initialized));
        }
    }
}
