//! Circular doubly-linked sibling rings
//!
//! Both the root ring and every child ring are circular lists threaded
//! through the `left`/`right` fields of the nodes. A ring has no head: any
//! member is an entry point, and a lone node points at itself.
//!
//! All operations are O(1) except [`Forest::ring_members`], which walks the
//! ring once.

use crate::storage::{Forest, NodeKey};
use smallvec::SmallVec;

/// Snapshot of a ring's members, in `right` order from the start node
pub(crate) type RingSnapshot = SmallVec<[NodeKey; 16]>;

impl Forest {
    /// Splices the singleton `node` into `anchor`'s ring, right after `anchor`.
    pub(crate) fn join(&mut self, anchor: NodeKey, node: NodeKey) {
        debug_assert!(self.is_singleton(node), "join expects a singleton");
        let right = self[anchor].right;

        self[node].left = anchor;
        self[node].right = right;
        self[right].left = node;
        self[anchor].right = node;
    }

    /// Unlinks `node` from its ring and turns it back into a singleton.
    ///
    /// The remaining members stay linked to each other. Detaching a
    /// singleton leaves it unchanged.
    pub(crate) fn detach(&mut self, node: NodeKey) {
        let left = self[node].left;
        let right = self[node].right;

        self[left].right = right;
        self[right].left = left;
        self[node].left = node;
        self[node].right = node;
    }

    /// Concatenates two disjoint rings: `other`'s ring is spliced in right
    /// after `anchor`.
    pub(crate) fn splice(&mut self, anchor: NodeKey, other: NodeKey) {
        let anchor_right = self[anchor].right;
        let other_left = self[other].left;

        self[anchor].right = other;
        self[other].left = anchor;
        self[other_left].right = anchor_right;
        self[anchor_right].left = other_left;
    }

    /// True if `node` is the only member of its ring.
    #[inline]
    pub(crate) fn is_singleton(&self, node: NodeKey) -> bool {
        self[node].right == node
    }

    /// Collects the ring containing `start`, beginning with `start`.
    ///
    /// Take a snapshot before relinking a ring; walking a ring while it is
    /// being restructured skips or repeats members.
    pub(crate) fn ring_members(&self, start: NodeKey) -> RingSnapshot {
        let mut members = RingSnapshot::new();
        let mut current = start;
        loop {
            members.push(current);
            current = self[current].right;
            if current == start {
                break;
            }
        }
        members
    }
}
