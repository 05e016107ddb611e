//! A bounded sequence: an ordered container with a fixed capacity.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};
use core::ops::{Deref, DerefMut};

/// Error returned when a [`BoundedVec`] is grown past its capacity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CapacityError;

/// A growable sequence with a hard capacity limit, fixed at construction.
///
/// The backing storage is allocated once, up front, and never moves or
/// reallocates afterwards. Growing the sequence past its capacity is a
/// checked error, not undefined behavior: [`push`][Self::push] and
/// [`alloc`][Self::alloc] reject further elements once the capacity is
/// reached.
///
/// [`clear`][Self::clear] resets the logical length only; the storage is
/// retained, so a `BoundedVec` can be refilled every frame without going
/// through the allocator.
///
/// Element access is provided by deref to a slice:
/// ```
/// use tilebin_core::util::seq::BoundedVec;
///
/// let mut seq = BoundedVec::new(4);
/// seq.push(123).unwrap();
/// assert_eq!(seq[0], 123);
/// assert_eq!(seq.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct BoundedVec<T> {
    items: Vec<T>,
    cap: usize,
}

impl<T> BoundedVec<T> {
    /// Creates an empty sequence with room for `cap` elements.
    pub fn new(cap: usize) -> Self {
        Self { items: Vec::with_capacity(cap), cap }
    }

    /// Returns the fixed capacity of `self`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Appends `val` to the end of `self`, returning a reference to it.
    ///
    /// Fails without modifying `self` if it is at capacity.
    pub fn push(&mut self, val: T) -> Result<&mut T, CapacityError> {
        if self.items.len() == self.cap {
            return Err(CapacityError);
        }
        self.items.push(val);
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    /// Reserves the next slot of `self` and returns a reference to it,
    /// initialized to `T::default()`.
    ///
    /// Fails without modifying `self` if it is at capacity.
    pub fn alloc(&mut self) -> Result<&mut T, CapacityError>
    where
        T: Default,
    {
        self.push(T::default())
    }

    /// Resets the length of `self` to zero.
    ///
    /// The capacity, and the backing storage, are retained.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Shortens `self` to at most `len` elements.
    ///
    /// Has no effect if `self` already holds `len` or fewer elements.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Returns a reference to the first element, if any.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns a reference to the last element, if any.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.items.last()
    }
}

impl<T> Deref for BoundedVec<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for BoundedVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl Display for CapacityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "sequence is at capacity")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_until_full() {
        let mut seq = BoundedVec::new(3);
        for i in 0..3 {
            assert_eq!(seq.push(i).copied(), Ok(i));
        }
        assert_eq!(seq.push(3), Err(CapacityError));
        assert_eq!(&seq[..], &[0, 1, 2]);
    }

    #[test]
    fn alloc_reserves_default_slot() {
        let mut seq: BoundedVec<u32> = BoundedVec::new(2);
        *seq.alloc().unwrap() = 42;
        assert_eq!(&seq[..], &[42]);
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut seq = BoundedVec::new(0);
        assert_eq!(seq.push(1), Err(CapacityError));
        assert!(seq.is_empty());
    }

    #[test]
    fn clear_retains_capacity() {
        let mut seq = BoundedVec::new(2);
        seq.push(1).unwrap();
        seq.push(2).unwrap();
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), 2);
        // Full again after refilling
        seq.push(3).unwrap();
        seq.push(4).unwrap();
        assert_eq!(seq.push(5), Err(CapacityError));
    }

    #[test]
    fn truncate_shortens_only() {
        let mut seq = BoundedVec::new(4);
        for i in 0..4 {
            seq.push(i).unwrap();
        }
        seq.truncate(2);
        assert_eq!(&seq[..], &[0, 1]);
        seq.truncate(3);
        assert_eq!(&seq[..], &[0, 1]);
    }

    #[test]
    fn front_and_back() {
        let mut seq = BoundedVec::new(4);
        assert_eq!(seq.front(), None);
        assert_eq!(seq.back(), None);
        seq.push(1).unwrap();
        seq.push(2).unwrap();
        assert_eq!(seq.front(), Some(&1));
        assert_eq!(seq.back(), Some(&2));
    }

    #[test]
    fn iteration_in_insertion_order() {
        let mut seq = BoundedVec::new(8);
        for i in [5, 3, 8] {
            seq.push(i).unwrap();
        }
        let collected: alloc::vec::Vec<_> = seq.iter().copied().collect();
        assert_eq!(collected, [5, 3, 8]);
    }
}
