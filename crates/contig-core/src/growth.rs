//! Capacity growth policy.

/// Growth rule applied when an insertion finds the storage full.
///
/// The policy is fixed at compile time: capacity doubles, starting
/// from [`MIN_CAPACITY`](Self::MIN_CAPACITY) for an empty buffer.
/// Explicit `reserve` calls bypass it and allocate exactly what was
/// asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthPolicy;

impl GrowthPolicy {
    /// Multiplier applied to the current capacity on reallocation.
    pub const GROWTH_FACTOR: usize = 2;

    /// Capacity of the first allocation made by an insertion.
    pub const MIN_CAPACITY: usize = 1;

    /// Capacity to allocate when a buffer of `current` slots is full.
    ///
    /// Returns `None` if doubling overflows `usize`; callers report that
    /// as a capacity overflow.
    pub fn next_capacity(current: usize) -> Option<usize> {
        current
            .checked_mul(Self::GROWTH_FACTOR)
            .map(|doubled| doubled.max(Self::MIN_CAPACITY))
    }
}
