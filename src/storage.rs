//! Node arena backing the Fibonacci heap
//!
//! Nodes live in a [`SlotMap`] and refer to each other through generational
//! [`NodeKey`]s instead of pointers. A key whose node has been released stops
//! resolving, so a stale handle is detected instead of aliasing a newer node.
//!
//! Internal links (parent, child, siblings) always point at live nodes, which
//! is why the forest is indexed directly with `forest[key]`. Keys that come
//! from outside the heap go through [`Forest::get`] first.

use crate::Key;
use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Generational key of a node in the forest
    pub struct NodeKey;
}

/// A tree node
///
/// `left`/`right` link the node into whichever ring currently holds it: the
/// root ring or its parent's child ring. A node alone in its ring links to
/// itself.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) key: Key,
    /// Number of direct children
    pub(crate) degree: usize,
    /// Lost a child since it last became a non-root
    pub(crate) marked: bool,
    pub(crate) parent: Option<NodeKey>,
    /// Any one member of the child ring
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
}

/// Owner of every node in one heap
#[derive(Debug, Clone, Default)]
pub(crate) struct Forest {
    nodes: SlotMap<NodeKey, Node>,
}

impl Forest {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of live nodes
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a detached singleton node: degree 0, unmarked, no relatives.
    pub(crate) fn alloc(&mut self, key: Key) -> NodeKey {
        self.nodes.insert_with_key(|id| Node {
            key,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: id,
            right: id,
        })
    }

    /// Releases a node. The caller must already have unlinked it.
    pub(crate) fn release(&mut self, id: NodeKey) -> Option<Node> {
        self.nodes.remove(id)
    }

    #[inline]
    pub(crate) fn contains(&self, id: NodeKey) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeKey) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Iterates over every live node, in arena order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }
}

impl Index<NodeKey> for Forest {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeKey) -> &Node {
        &self.nodes[id]
    }
}

impl IndexMut<NodeKey> for Forest {
    #[inline]
    fn index_mut(&mut self, id: NodeKey) -> &mut Node {
        &mut self.nodes[id]
    }
}
