//! IndexMap: open-addressed (linear probing) table from element to its
//! position in the dense store.
//!
//! The table never sees elements directly. A live slot records the element's
//! precomputed hash and its dense-store position; equality is resolved by the
//! caller through the position (`eq(position)`). Removal leaves a tombstone so
//! probe chains through the slot stay intact until the next rebuild.

use log::trace;

/// Initial number of slots.
pub(crate) const INITIAL_CAPACITY: usize = 16;

// Load factor threshold 0.7, kept as a ratio for integer comparisons.
const LOAD_NUM: usize = 7;
const LOAD_DEN: usize = 10;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Slot {
    Empty,
    Live { hash: u64, position: usize },
    Tombstone,
}

#[derive(Debug)]
pub(crate) struct IndexMap {
    slots: Vec<Slot>,
    live: usize,
    tombstones: usize,
}

#[inline]
fn exceeds_load(occupied: usize, capacity: usize) -> bool {
    occupied * LOAD_DEN > capacity * LOAD_NUM
}

impl IndexMap {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; capacity.max(1)],
            live: 0,
            tombstones: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    #[cfg(test)]
    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    #[inline]
    fn home(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    // Shared probe loop: stops on an empty slot, a matching live slot, or a
    // full wrap back to the home slot.
    fn probe<F>(&self, hash: u64, mut is_match: F) -> Option<usize>
    where
        F: FnMut(u64, usize) -> bool,
    {
        let cap = self.slots.len();
        let start = self.home(hash);
        let mut i = start;
        loop {
            match self.slots[i] {
                Slot::Empty => return None,
                Slot::Live { hash: h, position } if is_match(h, position) => return Some(i),
                _ => {}
            }
            i = (i + 1) % cap;
            if i == start {
                return None;
            }
        }
    }

    /// Locate the live slot whose element equals the query, as decided by
    /// `eq(position)`. Returns the slot index.
    pub(crate) fn find<F>(&self, hash: u64, mut eq: F) -> Option<usize>
    where
        F: FnMut(usize) -> bool,
    {
        self.probe(hash, |h, position| h == hash && eq(position))
    }

    /// Locate the live slot recording `position`. Never calls user code.
    pub(crate) fn find_position(&self, hash: u64, position: usize) -> Option<usize> {
        self.probe(hash, |h, p| h == hash && p == position)
    }

    /// Record `(hash, position)` in the first empty or tombstoned slot of the
    /// probe chain. The caller has already checked the element is absent.
    pub(crate) fn insert(&mut self, hash: u64, position: usize) -> usize {
        debug_assert!(self.live < self.slots.len(), "index map is full");
        let cap = self.slots.len();
        let mut i = self.home(hash);
        while let Slot::Live { .. } = self.slots[i] {
            i = (i + 1) % cap;
        }
        if self.slots[i] == Slot::Tombstone {
            self.tombstones -= 1;
        }
        self.slots[i] = Slot::Live { hash, position };
        self.live += 1;
        i
    }

    /// Logically delete a live slot.
    pub(crate) fn tombstone(&mut self, slot: usize) {
        debug_assert!(matches!(self.slots[slot], Slot::Live { .. }));
        self.slots[slot] = Slot::Tombstone;
        self.live -= 1;
        self.tombstones += 1;
    }

    pub(crate) fn position(&self, slot: usize) -> usize {
        match self.slots[slot] {
            Slot::Live { position, .. } => position,
            _ => unreachable!("slot {slot} is not live"),
        }
    }

    pub(crate) fn set_position(&mut self, slot: usize, new_position: usize) {
        if let Slot::Live { position, .. } = &mut self.slots[slot] {
            *position = new_position;
        } else {
            debug_assert!(false, "set_position on non-live slot {slot}");
        }
    }

    /// Make room for one more insertion without crossing the load factor.
    ///
    /// Occupancy counts tombstones. When live entries alone would cross the
    /// threshold the table doubles; otherwise it is rebuilt in place, which
    /// only purges tombstones. Returns true if a rebuild happened.
    pub(crate) fn reserve_one(&mut self) -> bool {
        let cap = self.slots.len();
        if !exceeds_load(self.live + self.tombstones + 1, cap) {
            return false;
        }
        let new_cap = if exceeds_load(self.live + 1, cap) {
            cap * 2
        } else {
            cap
        };
        self.rehash(new_cap);
        true
    }

    fn rehash(&mut self, new_cap: usize) {
        let old_cap = self.slots.len();
        let dropped = self.tombstones;
        let old = std::mem::replace(&mut self.slots, vec![Slot::Empty; new_cap]);
        self.live = 0;
        self.tombstones = 0;
        for slot in old {
            if let Slot::Live { hash, position } = slot {
                self.insert(hash, position);
            }
        }
        trace!(
            "index map rehash: {} -> {} slots, {} live, {} tombstones dropped",
            old_cap,
            new_cap,
            self.live,
            dropped
        );
    }

    /// Reset to all-empty, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.live = 0;
        self.tombstones = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Positions double as values: slot i's element "equals" q when position == q.
    fn find_val(m: &IndexMap, hash: u64, q: usize) -> Option<usize> {
        m.find(hash, |p| p == q)
    }

    /// Colliding hashes land in consecutive slots and are all found.
    #[test]
    fn collisions_probe_linearly() {
        let mut m = IndexMap::with_capacity(INITIAL_CAPACITY);
        let a = m.insert(5, 0);
        let b = m.insert(5, 1);
        let c = m.insert(21, 2); // 21 % 16 == 5
        assert_eq!((a, b, c), (5, 6, 7));
        assert_eq!(find_val(&m, 5, 1), Some(6));
        assert_eq!(find_val(&m, 21, 2), Some(7));
        assert_eq!(find_val(&m, 5, 9), None);
    }

    /// Tombstones keep later chain members reachable and are reused by insert.
    #[test]
    fn tombstone_preserves_chain_and_is_reused() {
        let mut m = IndexMap::with_capacity(INITIAL_CAPACITY);
        let a = m.insert(3, 0);
        m.insert(3, 1);
        m.tombstone(a);
        assert_eq!(m.live(), 1);
        assert_eq!(m.tombstones(), 1);
        assert_eq!(find_val(&m, 3, 0), None);
        assert_eq!(find_val(&m, 3, 1), Some(4));

        let reused = m.insert(3, 2);
        assert_eq!(reused, a);
        assert_eq!(m.tombstones(), 0);
        assert_eq!(m.live(), 2);
    }

    /// Probing wraps past the end of the table.
    #[test]
    fn probe_wraps_around() {
        let mut m = IndexMap::with_capacity(INITIAL_CAPACITY);
        m.insert(15, 0);
        let s = m.insert(15, 1);
        assert_eq!(s, 0);
        assert_eq!(find_val(&m, 15, 1), Some(0));
        assert_eq!(m.find_position(15, 1), Some(0));
    }

    /// A table with no empty slots still terminates after one full wrap.
    #[test]
    fn full_wrap_terminates() {
        let mut m = IndexMap::with_capacity(4);
        for p in 0..4 {
            let s = m.insert(p as u64, p);
            m.tombstone(s);
        }
        assert_eq!(m.tombstones(), 4);
        assert_eq!(find_val(&m, 2, 2), None);
    }

    /// Position updates are visible through lookups by position.
    #[test]
    fn set_position_relocates_entry() {
        let mut m = IndexMap::with_capacity(INITIAL_CAPACITY);
        let s = m.insert(9, 4);
        m.set_position(s, 1);
        assert_eq!(m.position(s), 1);
        assert_eq!(m.find_position(9, 1), Some(s));
        assert_eq!(m.find_position(9, 4), None);
    }

    /// Growth happens before the 12th entry of a 16-slot table and keeps every
    /// entry reachable.
    #[test]
    fn reserve_one_doubles_past_threshold() {
        let mut m = IndexMap::with_capacity(INITIAL_CAPACITY);
        for p in 0..11 {
            assert!(!m.reserve_one());
            m.insert(p as u64 * 16, p);
        }
        assert_eq!(m.capacity(), 16);
        assert!(m.reserve_one());
        assert_eq!(m.capacity(), 32);
        m.insert(11 * 16, 11);
        for p in 0..12 {
            assert_eq!(m.find_position(p as u64 * 16, p).map(|s| m.position(s)), Some(p));
        }
    }

    /// Tombstone pressure alone triggers an in-place rebuild, not growth.
    #[test]
    fn reserve_one_purges_tombstones_in_place() {
        let mut m = IndexMap::with_capacity(INITIAL_CAPACITY);
        let mut slots = Vec::new();
        for p in 0..11 {
            slots.push(m.insert(p as u64, p));
        }
        for s in slots.drain(..8) {
            m.tombstone(s);
        }
        assert_eq!((m.live(), m.tombstones()), (3, 8));
        assert!(m.reserve_one());
        assert_eq!(m.capacity(), 16);
        assert_eq!((m.live(), m.tombstones()), (3, 0));
        for p in 8..11 {
            assert!(m.find_position(p as u64, p).is_some());
        }
    }

    #[test]
    fn clear_resets_counts_keeps_capacity() {
        let mut m = IndexMap::with_capacity(64);
        let s = m.insert(1, 0);
        m.insert(2, 1);
        m.tombstone(s);
        m.clear();
        assert_eq!((m.live(), m.tombstones(), m.capacity()), (0, 0, 64));
        assert_eq!(m.find_position(2, 1), None);
    }
}
