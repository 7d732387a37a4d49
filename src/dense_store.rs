//! DenseStore: contiguous storage of live elements, addressed by position.

use core::iter::FusedIterator;
use log::debug;

#[derive(Debug)]
struct Record<T> {
    value: T,
    hash: u64,
}

/// Packed array of live elements. Positions `[0, len)` are always occupied.
///
/// Each element carries the `u64` hash computed when it was inserted so the
/// index map can relocate it without calling `T: Hash` again.
#[derive(Debug)]
pub(crate) struct DenseStore<T> {
    records: Vec<Record<T>>,
}

impl<T> DenseStore<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity.max(1)),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Place `value` at position `len` and return that position.
    pub(crate) fn append(&mut self, value: T, hash: u64) -> usize {
        let cap = self.records.capacity();
        if self.records.len() == cap {
            // Double explicitly instead of relying on Vec's growth policy.
            self.records.reserve_exact(cap.max(1));
            debug!(
                "dense store grown: {} -> {} slots",
                cap,
                self.records.capacity()
            );
        }
        let position = self.records.len();
        self.records.push(Record { value, hash });
        position
    }

    #[inline]
    pub(crate) fn get(&self, position: usize) -> &T {
        &self.records[position].value
    }

    #[inline]
    pub(crate) fn hash_at(&self, position: usize) -> u64 {
        self.records[position].hash
    }

    /// Drop the final position and return its value.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        self.records.pop().map(|r| r.value)
    }

    /// Overwrite `position` with the last element and shrink by one.
    /// Removing the last position degenerates to `remove_last`.
    pub(crate) fn swap_remove(&mut self, position: usize) -> T {
        self.records.swap_remove(position).value
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.records.iter(),
        }
    }
}

/// Iterator over the elements of a `RandomSet`, in dense-store order.
///
/// The order is an artifact of insertions and swap-removals; do not rely on it.
#[derive(Debug)]
pub struct Iter<'a, T> {
    it: core::slice::Iter<'a, Record<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            it: self.it.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|r| &r.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
