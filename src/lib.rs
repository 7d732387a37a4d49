//! random-set: a single-threaded hash set with O(1) average insertion,
//! removal, membership test, and uniform random pick of an element.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: make `get_random` O(1) and exactly uniform without giving up O(1)
//!   hash-set operations.
//! - Layers:
//!   - DenseStore<T>: packed array holding every element once, positions
//!     `[0, len)` with no gaps. A uniform index into it is a uniform pick.
//!   - IndexMap: open-addressed table (linear probing, tombstone deletion)
//!     mapping each element to its dense-store position.
//!   - RandomSet<T, S, R>: public API keeping the two in step on every
//!     mutation; owns the hasher `S` and the randomness source `R`.
//!
//! Invariants (hold whenever no public method is running)
//! - Every live index slot records a position `p < len`, and hashing and
//!   comparing `dense[p]` leads back to that slot.
//! - Live index slots == `len`; no two live slots refer to equal elements.
//! - (live + tombstones) / table capacity never exceeds 0.7.
//!
//! Linking by position
//! - Index slots hold `(hash, position)`, not the element. Equality during a
//!   probe is checked against `dense[position]`, so `T` is stored once and
//!   needs no `Clone`.
//! - Each dense record keeps the `u64` hash computed at insertion. Rehash and
//!   the relocation step of `remove` use stored hashes, so `T: Hash` runs only
//!   on the value passed into a call.
//!
//! Removal
//! - Swap-with-last: the final element's index slot is repointed at the
//!   removed position, the final element moves into the hole, then the
//!   removed element's slot becomes a tombstone. Removing the final element
//!   skips the move.
//!
//! Growth
//! - The dense store doubles when full and never shrinks.
//! - Before each insertion the index checks its load including tombstones.
//!   It doubles when live entries alone would cross 0.7; otherwise it rebuilds
//!   at the same size to purge tombstones. Capacity starts at 16.
//!
//! Concurrency and reentrancy
//! - No internal synchronization. A set is `Send` but not `Sync`; share one
//!   behind a `Mutex`.
//! - A debug-only guard panics if `Hash`/`Eq` code re-enters the same set
//!   while a call is in progress.
//!
//! Randomness
//! - Each set owns its RNG (`Pcg64` by default, seeded from OS entropy or via
//!   `seed_from_u64`), so separate sets are independent and reproducible.

mod dense_store;
mod error;
mod index_map;
mod random_set;
mod random_set_proptest;
mod reentrancy;

// Public surface
pub use dense_store::Iter;
pub use error::SampleError;
pub use random_set::RandomSet;
