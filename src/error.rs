//! Error types for heap operations
//!
//! - [`HeapError`]: returned by the public heap operations.
//! - [`InvariantError`]: returned by
//!   [`FibonacciHeap::check_invariants`](crate::fibonacci::FibonacciHeap::check_invariants)
//!   when the forest is structurally inconsistent.

use crate::Key;
use thiserror::Error;

/// Error type for heap operations
///
/// Every operation validates its preconditions before touching the forest,
/// so an `Err` always means the heap was left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The operation needs at least one element
    #[error("heap is empty")]
    EmptyHeap,
    /// `decrease_key` was given a key larger than the current one
    #[error("new key {requested} is greater than current key {current}")]
    InvalidKeyUpdate {
        /// Key currently stored in the node
        current: Key,
        /// Key the caller asked for
        requested: Key,
    },
    /// A key-addressed lookup found no node holding the key
    #[error("no node with key {0}")]
    NodeNotFound(Key),
    /// The handle refers to a removed node or to another heap
    #[error("handle is no longer valid (element was removed or belongs to another heap)")]
    InvalidHandle,
}

/// Error returned when a structural invariant of the forest does not hold.
///
/// Carries a human-readable description of the failed check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
