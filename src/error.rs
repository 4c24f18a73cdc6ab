//! Failures surfaced by `ProbingHashTable`.

use std::collections::TryReserveError;
use thiserror::Error;

/// Error returned by fallible table operations.
///
/// Every variant is reported before the table's entries or length change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The slot arena or an owned key copy could not be allocated.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
    /// Doubling `capacity` would overflow `usize`.
    #[error("capacity {capacity} cannot be doubled without overflow")]
    CapacityOverflow { capacity: usize },
    /// An absent value was passed where a value reference is required.
    #[error("value must not be null")]
    NullValue,
}
