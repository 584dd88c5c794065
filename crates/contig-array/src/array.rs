//! The [`DynamicArray`] type: construction, access, and ownership transfer.
//!
//! Growth, insertion, removal, resizing and assignment are implemented in
//! sibling modules as further `impl` blocks on the same type.

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice::{self, SliceIndex};

use contig_core::{AllocError, Bitwise, Relocation};
use contig_raw::RawBuffer;

use crate::guard::InitGuard;

/// A contiguous, growable array of `T`.
///
/// `R` selects how elements are relocated when storage grows or the tail
/// shifts (see [`Relocation`]). The default, [`Bitwise`], moves elements
/// with a memory copy. [`Duplicate`](contig_core::Duplicate) clones them
/// and drops the originals only after every clone succeeded.
///
/// Slots `[0, len)` of the storage are always live, slots
/// `[len, capacity)` are always uninitialised.
pub struct DynamicArray<T, R = Bitwise> {
    pub(crate) storage: RawBuffer<T>,
    pub(crate) len: usize,
    pub(crate) _policy: PhantomData<fn() -> R>,
}

impl<T> DynamicArray<T> {
    /// An empty array with zero capacity. Does not allocate.
    pub const fn new() -> Self {
        Self::empty()
    }

    /// An empty array with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Bitwise)
    }
}

impl<T: Default> DynamicArray<T> {
    /// An array of `len` default values with `capacity == len`.
    pub fn with_len(len: usize) -> Self {
        Self::with_len_in(len, Bitwise)
    }
}

impl<T, R> DynamicArray<T, R> {
    /// An empty array using relocation policy `R`.
    pub fn new_in(_policy: R) -> Self {
        Self::empty()
    }

    /// An empty array with room for exactly `capacity` elements, using
    /// relocation policy `R`.
    pub fn with_capacity_in(capacity: usize, _policy: R) -> Self {
        Self {
            storage: RawBuffer::with_capacity(capacity),
            len: 0,
            _policy: PhantomData,
        }
    }

    /// Fallible form of [`with_capacity_in`](Self::with_capacity_in).
    pub fn try_with_capacity_in(capacity: usize, _policy: R) -> Result<Self, AllocError> {
        Ok(Self {
            storage: RawBuffer::try_with_capacity(capacity)?,
            len: 0,
            _policy: PhantomData,
        })
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current storage can hold without growing.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialised; the pointer is non-null
        // and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Pointer to the first element (or a dangling, aligned pointer when
    /// empty).
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Mutable pointer to the first element.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Exchange contents with `other` in O(1). No element is touched.
    ///
    /// This shadows the slice method `<[T]>::swap(a, b)`; to exchange two
    /// elements, go through the slice:
    ///
    /// ```
    /// use contig_array::DynamicArray;
    ///
    /// let mut arr: DynamicArray<i32> = DynamicArray::from([1, 2, 3]);
    /// arr.as_mut_slice().swap(0, 2);
    /// assert_eq!(arr, [3, 2, 1]);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Move the whole array out, leaving `self` empty with zero capacity.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Drop the current contents and take over `source`'s storage and
    /// length. `source` is left empty with zero capacity.
    pub fn assign_from(&mut self, source: &mut Self) {
        *self = source.take();
    }

    pub(crate) const fn empty() -> Self {
        Self {
            storage: RawBuffer::new(),
            len: 0,
            _policy: PhantomData,
        }
    }
}

impl<T: Default, R> DynamicArray<T, R> {
    /// An array of `len` default values with `capacity == len`, using
    /// relocation policy `R`.
    ///
    /// If `T::default` panics, the values built so far are dropped and
    /// the storage is released.
    pub fn with_len_in(len: usize, _policy: R) -> Self {
        let mut storage = RawBuffer::with_capacity(len);
        let mut guard = InitGuard::new(storage.as_mut_ptr());
        for _ in 0..len {
            // SAFETY: fewer than `len` pushes into a `len`-slot buffer.
            unsafe { guard.push(T::default()) };
        }
        guard.disarm();
        Self {
            storage,
            len,
            _policy: PhantomData,
        }
    }
}

impl<T, R> Drop for DynamicArray<T, R> {
    fn drop(&mut self) {
        // SAFETY: slots [0, len) are live and owned by this array; the
        // storage itself is released afterwards by `RawBuffer::drop`.
        unsafe { ptr::drop_in_place(self.as_mut_slice() as *mut [T]) };
    }
}

impl<T, R> Default for DynamicArray<T, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, R> Deref for DynamicArray<T, R> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, R> DerefMut for DynamicArray<T, R> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, R, I: SliceIndex<[T]>> Index<I> for DynamicArray<T, R> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, R, I: SliceIndex<[T]>> IndexMut<I> for DynamicArray<T, R> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug, R> fmt::Debug for DynamicArray<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, R, S> PartialEq<DynamicArray<T, S>> for DynamicArray<T, R> {
    fn eq(&self, other: &DynamicArray<T, S>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, R> Eq for DynamicArray<T, R> {}

impl<T: PartialEq, R> PartialEq<[T]> for DynamicArray<T, R> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, R, const N: usize> PartialEq<[T; N]> for DynamicArray<T, R> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, R: Relocation<T>, const N: usize> From<[T; N]> for DynamicArray<T, R> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}
