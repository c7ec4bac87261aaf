//! Inspection helpers for the Fibonacci heap
//!
//! Nothing here is needed to use the heap. These views exist for tests and
//! debugging: a level-order dump of every tree, a few shape counters, and
//! [`FibonacciHeap::check_invariants`], which walks the whole forest.

use crate::error::InvariantError;
use crate::fibonacci::FibonacciHeap;
use crate::ring::RingSnapshot;
use crate::storage::NodeKey;
use crate::Key;
use slotmap::SecondaryMap;
use std::fmt;

/// Level-order layout of one tree of the root ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDump {
    /// Degree of the root
    pub degree: usize,
    /// Keys per depth; `levels[0]` holds the root alone. Children appear in
    /// child-ring order.
    pub levels: Vec<Vec<Key>>,
}

impl TreeDump {
    /// Key of the tree's root
    pub fn root_key(&self) -> Key {
        self.levels[0][0]
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}

impl FibonacciHeap {
    /// Dumps every tree, ordered by ascending root degree, then ascending
    /// root key
    pub fn trees(&self) -> Vec<TreeDump> {
        let Some(min) = self.min else {
            return Vec::new();
        };

        let mut trees: Vec<TreeDump> = self
            .nodes
            .ring_members(min)
            .into_iter()
            .map(|root| self.dump_tree(root))
            .collect();
        trees.sort_by_key(|tree| (tree.degree, tree.root_key()));
        trees
    }

    fn dump_tree(&self, root: NodeKey) -> TreeDump {
        let mut levels = Vec::new();
        let mut level = vec![root];
        while !level.is_empty() {
            let mut next = Vec::new();
            for &id in &level {
                if let Some(child) = self.nodes[id].child {
                    next.extend(self.nodes.ring_members(child));
                }
            }
            levels.push(level.iter().map(|&id| self.nodes[id].key).collect());
            level = next;
        }
        TreeDump {
            degree: self.nodes[root].degree,
            levels,
        }
    }

    /// Number of trees in the root ring
    pub fn root_count(&self) -> usize {
        self.min
            .map_or(0, |min| self.nodes.ring_members(min).len())
    }

    /// Largest degree of any node
    pub fn max_degree(&self) -> usize {
        self.nodes
            .iter()
            .map(|(_, node)| node.degree)
            .max()
            .unwrap_or(0)
    }

    /// Number of marked nodes
    pub fn marked_count(&self) -> usize {
        self.nodes.iter().filter(|(_, node)| node.marked).count()
    }

    /// Verifies the structural invariants of the forest
    ///
    /// Checks heap order, sibling-ring consistency, parent and degree
    /// bookkeeping, that roots are unmarked, that `min` is a minimum root,
    /// that `len` matches the reachable node count, and that every node of
    /// degree `k` roots at least `F(k+2)` nodes.
    ///
    /// # Errors
    /// Returns an [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.len != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "len is {} but the arena holds {} nodes",
                self.len,
                self.nodes.len()
            )));
        }

        let Some(min) = self.min else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err(InvariantError::new(format!(
                    "min is absent but len is {}",
                    self.len
                )))
            };
        };

        let min_node = self
            .nodes
            .get(min)
            .ok_or_else(|| InvariantError::new("min points at a released node"))?;
        let min_key = min_node.key;

        let roots = self.checked_ring(min)?;
        for &root in &roots {
            let node = &self.nodes[root];
            if node.parent.is_some() {
                return Err(InvariantError::new(format!(
                    "root {} has a parent",
                    node.key
                )));
            }
            if node.marked {
                return Err(InvariantError::new(format!("root {} is marked", node.key)));
            }
            if node.key < min_key {
                return Err(InvariantError::new(format!(
                    "root {} is smaller than min {}",
                    node.key, min_key
                )));
            }
        }

        // Pre-order walk over the whole forest
        let mut order: Vec<NodeKey> = Vec::with_capacity(self.len);
        let mut pending: Vec<NodeKey> = roots.to_vec();
        while let Some(id) = pending.pop() {
            order.push(id);
            if order.len() > self.len {
                return Err(InvariantError::new(format!(
                    "forest reaches more than len = {} nodes",
                    self.len
                )));
            }

            let node = &self.nodes[id];
            let children = match node.child {
                Some(child) => self.checked_ring(child)?,
                None => RingSnapshot::new(),
            };
            if children.len() != node.degree {
                return Err(InvariantError::new(format!(
                    "node {} has degree {} but {} children",
                    node.key,
                    node.degree,
                    children.len()
                )));
            }
            for &child in &children {
                let child_node = &self.nodes[child];
                if child_node.parent != Some(id) {
                    return Err(InvariantError::new(format!(
                        "child {} does not point back at parent {}",
                        child_node.key, node.key
                    )));
                }
                if child_node.key < node.key {
                    return Err(InvariantError::new(format!(
                        "heap order broken: child {} under parent {}",
                        child_node.key, node.key
                    )));
                }
                pending.push(child);
            }
        }

        if order.len() != self.len {
            return Err(InvariantError::new(format!(
                "forest reaches {} nodes but len is {}",
                order.len(),
                self.len
            )));
        }

        // Children precede their parents in reverse pre-order
        let mut sizes: SecondaryMap<NodeKey, usize> = SecondaryMap::with_capacity(order.len());
        for &id in order.iter().rev() {
            let node = &self.nodes[id];
            let mut size = 1;
            if let Some(child) = node.child {
                for member in self.nodes.ring_members(child) {
                    size += sizes.get(member).copied().unwrap_or(0);
                }
            }
            if size < fibonacci_number(node.degree + 2) {
                return Err(InvariantError::new(format!(
                    "node {} of degree {} roots only {} nodes",
                    node.key, node.degree, size
                )));
            }
            sizes.insert(id, size);
        }

        Ok(())
    }

    /// Snapshots a ring, checking its links along the way
    fn checked_ring(&self, start: NodeKey) -> Result<RingSnapshot, InvariantError> {
        let mut members = RingSnapshot::new();
        let mut current = start;
        loop {
            let node = self
                .nodes
                .get(current)
                .ok_or_else(|| InvariantError::new("ring links to a released node"))?;
            let right = self.nodes.get(node.right);
            let left = self.nodes.get(node.left);
            if right.map(|r| r.left) != Some(current) || left.map(|l| l.right) != Some(current) {
                return Err(InvariantError::new(format!(
                    "sibling links of {} are inconsistent",
                    node.key
                )));
            }

            members.push(current);
            if members.len() > self.len {
                return Err(InvariantError::new("ring does not close"));
            }

            current = node.right;
            if current == start {
                return Ok(members);
            }
        }
    }
}

/// F(0) = 0, F(1) = 1, saturating at `usize::MAX`
fn fibonacci_number(n: usize) -> usize {
    let (mut a, mut b) = (0usize, 1usize);
    for _ in 0..n {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a
}

impl fmt::Display for FibonacciHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty)");
        }
        for (i, tree) in self.trees().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "degree {}:", tree.degree)?;
            for level in &tree.levels {
                let keys: Vec<String> = level.iter().map(Key::to_string).collect();
                write!(f, " [{}]", keys.join(" "))?;
            }
        }
        Ok(())
    }
}
