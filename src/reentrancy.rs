//! Debug-only reentrancy guard.
//!
//! `RandomSet` calls user code (`T: Hash`, `T: Eq`) while its dense store and
//! index map may be transiently out of step. A callback that re-enters the
//! same set from there would observe a broken pairing, so every operation
//! that hashes or compares enters this guard first. A nested entry panics in debug builds;
//! in release builds the guard is a zero-sized no-op.
//!
//! The guard uses a `Cell`, so a set is `!Sync`. It stays `Send`: callers that
//! need shared access wrap the set in a `Mutex`.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-set reentrancy tracker.
#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // Keeps `!Sync` in release builds too.
    _nosync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _nosync: PhantomData,
        }
    }

    /// Enter a guarded section. In debug builds, panics if already entered.
    #[inline]
    pub(crate) fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrancy detected: RandomSet accessed from inside Hash/Eq"
            );
            return ReentrancyGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ReentrancyGuard { _z: PhantomData };
        }
    }
}

/// RAII guard returned by `DebugReentrancy::enter`.
pub(crate) struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(false);
    }
}
