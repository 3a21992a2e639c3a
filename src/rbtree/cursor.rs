use super::{Link, NodeId, NodeStore, RbTree};
use crate::compare::{Comparator, Payload};
use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one tree instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u64);

impl TreeId {
    pub(super) fn fresh() -> Self {
        TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A position in a tree: one entry, or the end.
///
/// A cursor is a plain handle and does not borrow the tree. Two cursors are equal
/// iff they refer to the same position of the same tree. Any structural change
/// of the tree may invalidate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub(super) tree: TreeId,
    pub(super) node: Link,
}

impl Cursor {
    pub fn tree(&self) -> TreeId {
        self.tree
    }

    /// Return the referenced node, or `None` for the end position
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub fn same_tree(&self, other: &Cursor) -> bool {
        self.tree == other.tree
    }

    /// Same as `RbTree::next`
    pub fn next<P, C, S>(self, tree: &RbTree<P, C, S>) -> Result<Cursor>
    where
        P: Payload,
        C: Comparator<P::Key>,
        S: NodeStore<P>,
    {
        tree.next(self)
    }

    /// Same as `RbTree::prev`
    pub fn prev<P, C, S>(self, tree: &RbTree<P, C, S>) -> Result<Cursor>
    where
        P: Payload,
        C: Comparator<P::Key>,
        S: NodeStore<P>,
    {
        tree.prev(self)
    }
}
