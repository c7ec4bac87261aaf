//! Simple Binary Heap implementation
//!
//! A straightforward array-backed binary min-heap that only implements the
//! base [`Heap`] trait. It has no handles and no `decrease_key`; the test
//! suite and the benchmarks use it as a reference to check the Fibonacci
//! heap against.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//! | `merge`   | O(m log n) |
//!
//! # Example
//!
//! ```rust
//! use fibheap::Heap;
//! use fibheap::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::new();
//! heap.push(3);
//! heap.push(1);
//! heap.push(2);
//!
//! assert_eq!(heap.peek(), Some(1));
//! assert_eq!(heap.pop(), Some(1));
//! assert_eq!(heap.pop(), Some(2));
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::Heap;
use crate::Key;

/// A simple binary min-heap of keys
#[derive(Debug, Clone, Default)]
pub struct SimpleBinaryHeap {
    /// Implicit binary tree: children of `i` live at `2i + 1` and `2i + 2`
    data: Vec<Key>,
}

impl Heap for SimpleBinaryHeap {
    fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, key: Key) {
        self.data.push(key);
        self.sift_up(self.data.len() - 1);
    }

    fn peek(&self) -> Option<Key> {
        self.data.first().copied()
    }

    fn pop(&mut self) -> Option<Key> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop();

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result
    }

    fn merge(&mut self, other: Self) {
        for key in other.data {
            self.push(key);
        }
    }
}

impl SimpleBinaryHeap {
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] < self.data[parent] {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left] < self.data[smallest] {
                smallest = left;
            }
            if right < len && self.data[right] < self.data[smallest] {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = SimpleBinaryHeap::new();

        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.push(3);
        heap.push(1);
        heap.push(2);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Some(1));

        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(3));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_merge() {
        let mut heap1 = SimpleBinaryHeap::new();
        let mut heap2 = SimpleBinaryHeap::new();

        heap1.push(3);
        heap1.push(1);
        heap2.push(4);
        heap2.push(2);

        heap1.merge(heap2);

        assert_eq!(heap1.len(), 4);
        for expected in 1..=4 {
            assert_eq!(heap1.pop(), Some(expected));
        }
    }

    #[test]
    fn test_descending_insertion() {
        let mut heap = SimpleBinaryHeap::new();
        for i in (0..100).rev() {
            heap.push(i);
        }
        for i in 0..100 {
            assert_eq!(heap.pop(), Some(i));
        }
    }
}
