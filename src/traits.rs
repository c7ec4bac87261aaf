//! Common traits for the heaps in this crate
//!
//! - [`Heap`]: base priority-queue surface shared by every heap here
//! - [`DecreaseKeyHeap`]: adds handle-based `decrease_key` and `delete`
//!
//! Both are min-heaps over [`Key`](crate::Key). Generic code written against
//! [`Heap`] runs unchanged on the Fibonacci heap and on the array-backed
//! reference heap, which is how the test suite cross-checks them.

use crate::error::HeapError;
use crate::Key;
use std::fmt;

/// A handle to an element in the heap, used for `decrease_key` and `delete`
///
/// Handles are small `Copy` values. A heap rejects handles it did not mint
/// and handles whose element has already been removed.
pub trait Handle: Copy + Eq + fmt::Debug {}

/// Base trait for min-heaps of [`Key`]s
///
/// # Example
///
/// ```rust
/// use fibheap::Heap;
/// use fibheap::simple_binary::SimpleBinaryHeap;
///
/// let mut heap = SimpleBinaryHeap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts a key
    fn push(&mut self, key: Key);

    /// Returns the minimum key without removing it
    fn peek(&self) -> Option<Key>;

    /// Removes and returns the minimum key
    fn pop(&mut self) -> Option<Key>;

    /// Moves every element of `other` into this heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with handle-based updates
///
/// # Example
///
/// ```rust
/// use fibheap::{DecreaseKeyHeap, Heap};
/// use fibheap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10);
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some(5));
/// ```
pub trait DecreaseKeyHeap: Heap {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts a key, returning a handle to its element
    fn push_with_handle(&mut self, key: Key) -> Self::Handle;

    /// Lowers the key of the element identified by `handle`
    ///
    /// # Errors
    /// - `HeapError::InvalidKeyUpdate` if `new_key` is greater than the current key
    /// - `HeapError::InvalidHandle` if the element is gone or the handle is foreign
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: Key) -> Result<(), HeapError>;

    /// Removes the element identified by `handle`, returning its key
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the element is gone or the handle is foreign
    fn delete(&mut self, handle: &Self::Handle) -> Result<Key, HeapError>;
}
