//! Arena-backed Fibonacci heap
//!
//! This crate provides a Fibonacci heap over integer keys, with
//! generation-checked handles for `decrease_key` and arbitrary deletion.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) insert and amortized decrease_key; O(log n)
//!   amortized extract_min and delete
//! - **Simple Binary Heap**: array-backed reference heap sharing the [`Heap`] trait
//! - **Diagnostics**: level-order tree dumps and an invariant checker
//!
//! The optional `tracing` feature logs consolidation and cut activity through
//! the `tracing` crate.
//!
//! # Example
//!
//! ```rust
//! use fibheap::fibonacci::FibonacciHeap;
//! use fibheap::HeapError;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5);
//! let handle2 = heap.insert(3);
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.find_min(), Ok(1));
//!
//! assert_eq!(heap.delete(&handle2), Ok(3));
//! assert_eq!(heap.delete(&handle2), Err(HeapError::InvalidHandle));
//! ```

pub mod diagnostics;
pub mod error;
pub mod fibonacci;
mod ring;
pub mod simple_binary;
mod storage;
mod tracing_helpers;
pub mod traits;

/// Key type stored in the heaps
pub type Key = i64;

// Re-export the main traits and errors for convenience
pub use error::{HeapError, InvariantError};
pub use traits::{DecreaseKeyHeap, Heap};
