//! RandomSet: public set API pairing the dense store with the index map.

use crate::dense_store::{DenseStore, Iter};
use crate::error::SampleError;
use crate::index_map::{IndexMap, INITIAL_CAPACITY};
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use rand::Rng;
use rand_core::{RngCore, SeedableRng};
use rand_pcg::Pcg64;

/// A set with O(1) average `insert`, `remove`, `contains` and uniform
/// [`get_random`](RandomSet::get_random).
///
/// Elements live once, packed in a dense array; an open-addressed index maps
/// each element to its array position. Removal swaps the last element into
/// the hole, so the array never has gaps and a uniform index into it is a
/// uniform pick over the set.
///
/// `S` hashes elements, `R` is the set's private randomness source.
pub struct RandomSet<T, S = DefaultHashBuilder, R = Pcg64> {
    hasher: S,
    rng: R,
    dense: DenseStore<T>,
    index: IndexMap,
    reentrancy: DebugReentrancy,
}

impl<T> RandomSet<T>
where
    T: Eq + Hash,
{
    /// Empty set with capacity 16, seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_hasher_and_rng(DefaultHashBuilder::default(), Pcg64::from_entropy())
    }

    /// Empty set whose random picks are reproducible for a given seed and
    /// sequence of operations.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::with_hasher_and_rng(DefaultHashBuilder::default(), Pcg64::seed_from_u64(seed))
    }
}

impl<T> Default for RandomSet<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> RandomSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_hasher_and_rng(hasher, Pcg64::from_entropy())
    }
}

impl<T, R> RandomSet<T, DefaultHashBuilder, R>
where
    T: Eq + Hash,
    R: RngCore,
{
    pub fn with_rng(rng: R) -> Self {
        Self::with_hasher_and_rng(DefaultHashBuilder::default(), rng)
    }
}

impl<T, S, R> RandomSet<T, S, R>
where
    T: Eq + Hash,
    S: BuildHasher,
    R: RngCore,
{
    pub fn with_hasher_and_rng(hasher: S, rng: R) -> Self {
        Self {
            hasher,
            rng,
            dense: DenseStore::with_capacity(INITIAL_CAPACITY),
            index: IndexMap::with_capacity(INITIAL_CAPACITY),
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    // Index slot of the live entry equal to `q`.
    fn find_slot<Q>(&self, hash: u64, q: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let dense = &self.dense;
        self.index.find(hash, |position| dense.get(position).borrow() == q)
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Number of elements the dense store holds before it must grow.
    pub fn capacity(&self) -> usize {
        self.dense.capacity()
    }

    /// Number of slots in the index table.
    pub fn table_capacity(&self) -> usize {
        self.index.capacity()
    }

    #[cfg(test)]
    pub(crate) fn table_occupancy(&self) -> usize {
        self.index.live() + self.index.tombstones()
    }

    /// Add `value`. Returns false, leaving the set unchanged, if an equal
    /// element is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&value);
        if self.find_slot(hash, &value).is_some() {
            return false;
        }
        self.index.reserve_one();
        let position = self.dense.append(value, hash);
        self.index.insert(hash, position);
        debug_assert_eq!(self.index.live(), self.dense.len());
        true
    }

    /// Remove the element equal to `value`. Returns false if it was absent.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        // The removed element is dropped after `take` has released the guard.
        self.take(value).is_some()
    }

    /// Remove and return the element equal to `value`, if any.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(value);
        let slot = self.find_slot(hash, value)?;
        let position = self.index.position(slot);
        let last = self.dense.len() - 1;

        let removed = if position == last {
            self.dense.remove_last()?
        } else {
            // Repoint the last element's entry at the hole it is about to fill.
            let last_hash = self.dense.hash_at(last);
            match self.index.find_position(last_hash, last) {
                Some(moved) => self.index.set_position(moved, position),
                None => debug_assert!(false, "no index entry for dense position {last}"),
            }
            self.dense.swap_remove(position)
        };
        self.index.tombstone(slot);
        debug_assert_eq!(self.index.live(), self.dense.len());
        Some(removed)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(value);
        self.find_slot(hash, value).is_some()
    }

    /// Pick an element uniformly at random. Advances the set's RNG.
    pub fn get_random(&mut self) -> Result<&T, SampleError> {
        let _g = self.reentrancy.enter();
        let len = self.dense.len();
        if len == 0 {
            return Err(SampleError::EmptyCollection);
        }
        let r = self.rng.gen_range(0..len);
        Ok(self.dense.get(r))
    }

    /// Remove every element. Allocations are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.dense.clear();
    }
}

impl<T, S, R> RandomSet<T, S, R> {
    /// Visit every element once, in no particular order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.dense.iter()
    }
}

impl<'a, T, S, R> IntoIterator for &'a RandomSet<T, S, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S, R> Extend<T> for RandomSet<T, S, R>
where
    T: Eq + Hash,
    S: BuildHasher,
    R: RngCore,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for RandomSet<T>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, S, R> fmt::Debug for RandomSet<T, S, R>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
