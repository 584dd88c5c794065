//! Relocation capability: how elements move between storage slots.
//!
//! A container that moves its elements (on growth, or when shifting the
//! tail for insert and erase) must pick an operation that cannot leave
//! the structure unrecoverable halfway through. The choice is made per
//! element type at monomorphisation time through [`Relocation::INFALLIBLE`]:
//!
//! - [`Bitwise`]: a plain memory move. Rust moves cannot fail, so the old
//!   slot simply becomes uninitialised.
//! - [`Duplicate`]: a `Clone`-based copy. The original stays live until
//!   every copy has succeeded, so a panicking `clone` leaves the source
//!   intact and the container can roll back.

/// Strategy used to transfer a live element into another slot.
///
/// Implementors are zero-sized markers passed as a type parameter to the
/// container. The container branches on [`INFALLIBLE`](Self::INFALLIBLE);
/// the branch is resolved at compile time.
pub trait Relocation<T> {
    /// `true` when relocation is a bitwise move that can never fail.
    ///
    /// When `false`, the container calls [`duplicate`](Self::duplicate)
    /// for every relocated element and destroys the originals only after
    /// all duplicates exist.
    const INFALLIBLE: bool;

    /// Produce a copy of `value` for relocation.
    ///
    /// Only called when [`INFALLIBLE`](Self::INFALLIBLE) is `false`.
    /// May panic; the container treats a panic as a failed relocation.
    fn duplicate(value: &T) -> T;
}

/// Relocate by bitwise move. The default policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bitwise;

impl<T> Relocation<T> for Bitwise {
    const INFALLIBLE: bool = true;

    fn duplicate(_value: &T) -> T {
        unreachable!("bitwise relocation never duplicates elements")
    }
}

/// Relocate by cloning, releasing originals only after success.
///
/// Gives growth the strong guarantee even when `T::clone` may panic,
/// at the cost of a clone plus a drop per relocated element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Duplicate;

impl<T: Clone> Relocation<T> for Duplicate {
    const INFALLIBLE: bool = false;

    fn duplicate(value: &T) -> T {
        value.clone()
    }
}
