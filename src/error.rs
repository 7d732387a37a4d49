//! Error type for operations that can fail.

use thiserror::Error;

/// Returned by [`RandomSet::get_random`](crate::RandomSet::get_random).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SampleError {
    /// The set holds no elements to pick from.
    #[error("cannot pick a random element from an empty set")]
    EmptyCollection,
}
