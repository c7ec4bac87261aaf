//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert (worst case) and O(1) amortized decrease_key
//! - O(log n) amortized extract_min and delete
//!
//! The structure is a collection of heap-ordered trees whose roots are linked
//! in a circular doubly linked list, with a cached pointer to the minimum
//! root. Work is deferred: `insert` only adds a root, and trees of equal
//! degree are merged later, during the consolidation that follows an
//! `extract_min`.
//!
//! `decrease_key` cuts a node away from its parent when heap order breaks.
//! A parent may lose one child silently (it becomes *marked*); losing a
//! second one cuts the parent too, and the cut cascades up the tree. This
//! keeps a tree of degree `k` at least `F(k+2)` nodes large, so degrees stay
//! O(log n).
//!
//! Nodes live in a generational arena, and [`FibonacciHandle`]s are checked
//! against both the arena generation and the heap that minted them.

use crate::error::HeapError;
use crate::storage::{Forest, NodeKey};
use crate::tracing_helpers::{debug_log, trace_log};
use crate::traits::{DecreaseKeyHeap, Handle, Heap};
use crate::Key;
use slotmap::SecondaryMap;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// ln((1 + sqrt 5) / 2)
const LN_PHI: f64 = 0.481_211_825_059_603_4;

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a heap, stamped into its handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct HeapId(u64);

impl HeapId {
    fn next() -> Self {
        HeapId(NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an element in a Fibonacci heap
///
/// Handles stay valid until their element is removed by `extract_min`,
/// `delete` or `clear`, or until the heap is merged into another heap.
/// After that every operation taking the handle fails with
/// [`HeapError::InvalidHandle`]. Handles are never shared between a heap
/// and its clones.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: HeapId,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use fibheap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5);
/// heap.insert(3);
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(3));
/// ```
pub struct FibonacciHeap {
    /// Minimum root; also the entry point of the root ring
    pub(crate) min: Option<NodeKey>,
    pub(crate) len: usize,
    pub(crate) nodes: Forest,
    id: HeapId,
}

impl FibonacciHeap {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` elements before the
    /// node arena reallocates
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            min: None,
            len: 0,
            nodes: Forest::with_capacity(capacity),
            id: HeapId::next(),
        }
    }

    /// Returns the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Inserts a key and returns a handle to its node
    ///
    /// # Time Complexity
    /// O(1) worst case; no consolidation happens here.
    pub fn insert(&mut self, key: Key) -> FibonacciHandle {
        let node = self.nodes.alloc(key);
        self.add_root(node);
        self.len += 1;
        self.handle(node)
    }

    /// Returns the minimum key
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap is empty.
    pub fn find_min(&self) -> Result<Key, HeapError> {
        self.min
            .map(|min| self.nodes[min].key)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Removes the minimum node and returns its key
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    pub fn extract_min(&mut self) -> Result<Key, HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;
        let key = self.nodes[min].key;

        // Children become roots; promotion resets their marks
        if let Some(child) = self.nodes[min].child.take() {
            for id in self.nodes.ring_members(child) {
                self.nodes.detach(id);
                let node = &mut self.nodes[id];
                node.parent = None;
                node.marked = false;
                self.nodes.join(min, id);
            }
            self.nodes[min].degree = 0;
        }

        if self.nodes.is_singleton(min) {
            self.min = None;
        } else {
            let next = self.nodes[min].right;
            self.nodes.detach(min);
            self.min = Some(next);
            self.consolidate(next);
        }

        self.nodes.release(min);
        self.len -= 1;
        Ok(key)
    }

    /// Lowers the key of the node behind `handle`
    ///
    /// An equal key is accepted and leaves the forest unchanged.
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the node is gone or the handle is foreign
    /// - `HeapError::InvalidKeyUpdate` if `new_key` is greater than the current key
    ///
    /// # Time Complexity
    /// O(1) amortized.
    pub fn decrease_key(
        &mut self,
        handle: &FibonacciHandle,
        new_key: Key,
    ) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        let current = self.nodes[node].key;
        if new_key > current {
            return Err(HeapError::InvalidKeyUpdate {
                current,
                requested: new_key,
            });
        }

        self.nodes[node].key = new_key;

        if let Some(parent) = self.nodes[node].parent {
            if new_key < self.nodes[parent].key {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if self.nodes[node].parent.is_none() {
            if let Some(min) = self.min {
                if new_key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
        }

        Ok(())
    }

    /// Removes the node behind `handle` and returns its key
    ///
    /// The node is forced to the front of the heap without touching its
    /// key, so every key value, `Key::MIN` included, can be deleted.
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the node is gone or the handle is foreign.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<Key, HeapError> {
        let node = self.resolve(handle)?;
        self.promote_to_min(node);
        self.extract_min()
    }

    /// Finds a node holding `key`
    ///
    /// Walks the whole forest depth-first, starting at the minimum root, and
    /// returns the first match. O(n); callers doing many lookups should keep
    /// their own key-to-handle index.
    pub fn find(&self, key: Key) -> Option<FibonacciHandle> {
        // (first member of the ring, next member to visit)
        let mut stack: SmallVec<[(NodeKey, NodeKey); 16]> =
            self.min.map(|min| (min, min)).into_iter().collect();

        while let Some((start, current)) = stack.pop() {
            let node = &self.nodes[current];
            if node.key == key {
                return Some(self.handle(current));
            }
            if node.right != start {
                stack.push((start, node.right));
            }
            if let Some(child) = node.child {
                stack.push((child, child));
            }
        }
        None
    }

    /// Deletes a node holding `key` and returns the key
    ///
    /// # Errors
    /// `HeapError::NodeNotFound` if no node holds `key`.
    pub fn delete_key(&mut self, key: Key) -> Result<Key, HeapError> {
        let handle = self.find(key).ok_or(HeapError::NodeNotFound(key))?;
        self.delete(&handle)
    }

    /// Lowers the key of a node holding `key` to `new_key`
    ///
    /// Returns the handle of the updated node.
    ///
    /// # Errors
    /// - `HeapError::NodeNotFound` if no node holds `key`
    /// - `HeapError::InvalidKeyUpdate` if `new_key` is greater than `key`
    pub fn decrease_key_of(
        &mut self,
        key: Key,
        new_key: Key,
    ) -> Result<FibonacciHandle, HeapError> {
        let handle = self.find(key).ok_or(HeapError::NodeNotFound(key))?;
        self.decrease_key(&handle, new_key)?;
        Ok(handle)
    }

    /// True if `handle` refers to a live node of this heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Returns the current key of the node behind `handle`
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the node is gone or the handle is foreign.
    pub fn key(&self, handle: &FibonacciHandle) -> Result<Key, HeapError> {
        self.resolve(handle).map(|node| self.nodes[node].key)
    }

    /// Moves every element of `other` into this heap
    ///
    /// The root rings are concatenated, so no consolidation happens. The
    /// nodes of `other` are re-homed into this heap's arena, which costs
    /// O(m) for m = `other.len()`, and the handles of `other` stop being
    /// valid.
    pub fn merge(&mut self, other: FibonacciHeap) {
        let Some(other_min) = other.min else {
            return;
        };

        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::with_capacity(other.len);
        for (old, node) in other.nodes.iter() {
            remap.insert(old, self.nodes.alloc(node.key));
        }
        for (old, node) in other.nodes.iter() {
            let copy = &mut self.nodes[remap[old]];
            copy.degree = node.degree;
            copy.marked = node.marked;
            copy.parent = node.parent.map(|p| remap[p]);
            copy.child = node.child.map(|c| remap[c]);
            copy.left = remap[node.left];
            copy.right = remap[node.right];
        }

        let other_min = remap[other_min];
        match self.min {
            Some(min) => {
                self.nodes.splice(min, other_min);
                if self.nodes[other_min].key < self.nodes[min].key {
                    self.min = Some(other_min);
                }
            }
            None => self.min = Some(other_min),
        }
        self.len += other.len;

        debug_log!(merged = other.len, len = self.len, "merged heaps");
    }

    /// Removes every element; all outstanding handles become invalid
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
        self.len = 0;
    }

    /// Drains the heap into a vector in non-decreasing key order
    pub fn into_sorted_vec(mut self) -> Vec<Key> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(key) = self.extract_min() {
            sorted.push(key);
        }
        sorted
    }

    fn handle(&self, node: NodeKey) -> FibonacciHandle {
        FibonacciHandle {
            heap: self.id,
            node,
        }
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap == self.id && self.nodes.contains(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Splices a detached singleton into the root ring and refreshes `min`
    fn add_root(&mut self, node: NodeKey) {
        match self.min {
            Some(min) => {
                self.nodes.join(min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }
    }

    /// Merges roots of equal degree until every degree occurs at most once,
    /// then rebuilds the root ring and recomputes `min`
    ///
    /// `start` is any member of the root ring.
    fn consolidate(&mut self, start: NodeKey) {
        let roots = self.nodes.ring_members(start);
        trace_log!(roots = roots.len(), len = self.len, "consolidating");

        // Indexed by degree. `self.len` still counts the extracted node, so
        // the bound holds; the resize below only guards a broken forest.
        let mut table: SmallVec<[Option<NodeKey>; 64]> =
            smallvec![None; max_degree_bound(self.len) + 1];

        for root in roots {
            let mut tree = root;
            let mut degree = self.nodes[tree].degree;
            loop {
                if degree >= table.len() {
                    table.resize(degree + 1, None);
                }
                match table[degree].take() {
                    Some(mut other) => {
                        // `other` came earlier in ring order and wins ties
                        if self.nodes[other].key <= self.nodes[tree].key {
                            std::mem::swap(&mut tree, &mut other);
                        }
                        self.link(other, tree);
                        degree += 1;
                    }
                    None => {
                        table[degree] = Some(tree);
                        break;
                    }
                }
            }
        }

        self.min = None;
        for root in table.into_iter().flatten() {
            self.nodes.detach(root);
            self.add_root(root);
        }

        debug_log!(roots = self.root_count(), "consolidated");
    }

    /// Makes root `child` a child of root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.nodes.detach(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;

        match self.nodes[parent].child {
            Some(first) => self.nodes.join(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        let parent = &mut self.nodes[parent];
        parent.degree += 1;
        trace_log!(parent = parent.key, degree = parent.degree, "linked");
    }

    /// Detaches `node` from its parent and moves it into the root ring
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        if self.nodes[parent].child == Some(node) {
            self.nodes[parent].child = if self.nodes.is_singleton(node) {
                None
            } else {
                Some(self.nodes[node].right)
            };
        }
        self.nodes.detach(node);
        self.nodes[parent].degree -= 1;

        let detached = &mut self.nodes[node];
        detached.parent = None;
        detached.marked = false;
        trace_log!(key = detached.key, "cut to root ring");

        self.add_root(node);
    }

    /// Walks up from `node`, cutting marked ancestors until it reaches a root
    /// or an unmarked node, which gets marked
    fn cascading_cut(&mut self, mut node: NodeKey) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                return;
            }
            trace_log!(key = self.nodes[node].key, "cascading cut");
            self.cut(node, parent);
            node = parent;
        }
    }

    /// Moves `node` to the root ring and makes it `min`, regardless of key
    ///
    /// Leaves `min` pointing at a possibly non-minimal root; the caller must
    /// extract it right away.
    fn promote_to_min(&mut self, node: NodeKey) {
        if let Some(parent) = self.nodes[node].parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(node);
    }
}

/// Upper bound on the degree of any node in a heap of `len` nodes:
/// floor(log_phi(len)), plus one slot of slack for rounding
pub(crate) fn max_degree_bound(len: usize) -> usize {
    if len < 2 {
        return 1;
    }
    ((len as f64).ln() / LN_PHI).floor() as usize + 1
}

impl Clone for FibonacciHeap {
    /// Copies the forest under a fresh heap id; handles of `self` are not
    /// valid for the copy and vice versa
    fn clone(&self) -> Self {
        Self {
            min: self.min,
            len: self.len,
            nodes: self.nodes.clone(),
            id: HeapId::next(),
        }
    }
}

impl Default for FibonacciHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FibonacciHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.find_min().ok())
            .finish()
    }
}

impl FromIterator<Key> for FibonacciHeap {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut heap = FibonacciHeap::new();
        heap.extend(iter);
        heap
    }
}

impl Extend<Key> for FibonacciHeap {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl Heap for FibonacciHeap {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, key: Key) {
        self.insert(key);
    }

    fn peek(&self) -> Option<Key> {
        self.find_min().ok()
    }

    fn pop(&mut self) -> Option<Key> {
        self.extract_min().ok()
    }

    fn merge(&mut self, other: Self) {
        FibonacciHeap::merge(self, other)
    }
}

impl DecreaseKeyHeap for FibonacciHeap {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, key: Key) -> Self::Handle {
        self.insert(key)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_key: Key) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_key)
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<Key, HeapError> {
        FibonacciHeap::delete(self, handle)
    }
}
