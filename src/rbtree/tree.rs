use super::cursor::TreeId;
use super::*;
use crate::compare::{Comparator, NaturalOrder, Payload};
use crate::error::{Result, TreeError};
use log::debug;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// The synthetic node sitting above the root: parent of the root and cache of
/// both extremes. All three links are `None` when the tree is empty
#[derive(Debug, Clone, Copy)]
pub(super) struct Header {
    pub(super) root: Link,
    pub(super) most: [Link; 2],
}

impl Header {
    fn empty() -> Self {
        Header {
            root: None,
            most: [None, None],
        }
    }

    pub(super) fn most(&self, side: Side) -> Link {
        self.most[side.index()]
    }

    pub(super) fn set_most(&mut self, side: Side, link: Link) {
        self.most[side.index()] = link;
    }
}

/// An ordered index over payloads of type `P`, balanced as a red-black tree.
///
/// Keys are projected from payloads with `Payload::key` and ordered by `C`.
/// Nodes live in the store `S`, addressed by `NodeId`.
pub struct RbTree<P, C = NaturalOrder, S = Arena<P>> {
    pub(super) header: Header,
    pub(super) len: usize,
    mode: Mode,
    comparator: C,
    pub(super) store: S,
    id: TreeId,
    marker: PhantomData<fn() -> P>,
}

impl<P> RbTree<P, NaturalOrder, Arena<P>>
where
    P: Payload,
    P::Key: Ord,
{
    /// Create an empty tree that rejects duplicate keys
    pub fn unique() -> Self {
        RbTree::with_comparator(Mode::Unique, NaturalOrder)
    }

    /// Create an empty tree that keeps duplicate keys
    pub fn multi() -> Self {
        RbTree::with_comparator(Mode::Multi, NaturalOrder)
    }
}

impl<P, C> RbTree<P, C, Arena<P>>
where
    P: Payload,
    C: Comparator<P::Key>,
{
    pub fn with_comparator(mode: Mode, comparator: C) -> Self {
        RbTree::with_store(mode, comparator, Arena::new())
    }
}

impl<P, C, S> RbTree<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    /// Create an empty tree whose nodes are allocated from `store`.
    /// The store should not hold any node yet
    pub fn with_store(mode: Mode, comparator: C, store: S) -> Self {
        RbTree {
            header: Header::empty(),
            len: 0,
            mode,
            comparator,
            store,
            id: TreeId::fresh(),
            marker: PhantomData,
        }
    }

    /// Return the number of entries in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_unique(&self) -> bool {
        self.mode == Mode::Unique
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        self.subtree_height(self.header.root)
    }

    fn subtree_height(&self, link: Link) -> usize {
        match link {
            None => 0,
            Some(id) => {
                let node = self.node(id);
                1 + self
                    .subtree_height(node.child(Side::Left))
                    .max(self.subtree_height(node.child(Side::Right)))
            }
        }
    }

    /// Release every node back to the store, children before their parent
    pub fn clear(&mut self) {
        let mut released = 0;
        let mut current = self.header.root;
        while let Some(id) = current {
            let node = self.node(id);
            if let Some(child) = node.child(Side::Left).or(node.child(Side::Right)) {
                current = Some(child);
                continue;
            }

            // Leaf: detach it from its parent and climb back
            let parent = node.parent;
            if let Some(parent) = parent {
                let side = self.side_of(parent, id);
                self.node_mut(parent).set_child(side, None);
            }
            self.store.release(id);
            released += 1;
            current = parent;
        }
        debug!("cleared tree {:?}: {} nodes released", self.id, released);

        self.header = Header::empty();
        self.len = 0;
    }

    /// Return a cursor to the first entry (equal to `end()` when empty)
    pub fn begin(&self) -> Cursor {
        self.cursor(self.header.most(Side::Left))
    }

    /// Return the end position: one past the last entry
    pub fn end(&self) -> Cursor {
        self.cursor(None)
    }

    /// Return a cursor to the root entry (equal to `end()` when empty)
    pub fn root(&self) -> Cursor {
        self.cursor(self.header.root)
    }

    /// Return whether the cursor was produced by this tree
    pub fn owns(&self, cursor: Cursor) -> bool {
        cursor.tree == self.id
    }

    /// Return the cursor following `cursor` in key order.
    /// Fails with `NoSuccessor` on the end position
    pub fn next(&self, cursor: Cursor) -> Result<Cursor> {
        let id = self.resolve(cursor)?.ok_or(TreeError::NoSuccessor)?;
        if self.header.most(Side::Right) == Some(id) {
            return Ok(self.end());
        }
        Ok(self.cursor(self.step(id, Side::Right)))
    }

    /// Return the cursor preceding `cursor` in key order. The predecessor of
    /// the end position is the last entry.
    /// Fails with `NoPredecessor` on the first entry
    pub fn prev(&self, cursor: Cursor) -> Result<Cursor> {
        let link = self.resolve(cursor)?;
        if link == self.header.most(Side::Left) {
            return Err(TreeError::NoPredecessor);
        }
        match link {
            None => Ok(self.cursor(self.header.most(Side::Right))),
            Some(id) => Ok(self.cursor(self.step(id, Side::Left))),
        }
    }

    /// Return the payload at `cursor`, if it refers to a live entry of this tree
    pub fn get(&self, cursor: Cursor) -> Option<&P> {
        match self.resolve(cursor) {
            Ok(Some(id)) => Some(&self.node(id).payload),
            _ => None,
        }
    }

    pub fn key(&self, cursor: Cursor) -> Option<&P::Key> {
        self.get(cursor).map(Payload::key)
    }

    pub fn value(&self, cursor: Cursor) -> Option<&P::Value> {
        self.get(cursor).map(Payload::value)
    }

    /// Only the value part is exposed mutably, so the ordering can't be broken
    pub fn value_mut(&mut self, cursor: Cursor) -> Option<&mut P::Value> {
        match self.resolve(cursor) {
            Ok(Some(id)) => Some(self.node_mut(id).payload.value_mut()),
            _ => None,
        }
    }

    /// Return an entry whose key compares equal to `key`, or the end.
    /// Among duplicates, which one is returned is unspecified
    pub fn find(&self, key: &P::Key) -> Cursor {
        self.cursor(self.find_link(key))
    }

    pub fn contains(&self, key: &P::Key) -> bool {
        self.find_link(key).is_some()
    }

    /// Return the number of entries whose key compares equal to `key`
    pub fn count(&self, key: &P::Key) -> usize {
        match self.mode {
            Mode::Unique => self.find_link(key).is_some() as usize,
            Mode::Multi => self.count_from(self.lower_bound_link(key), key),
        }
    }

    /// Return the first entry whose key is not less than `key`
    pub fn lower_bound(&self, key: &P::Key) -> Cursor {
        self.cursor(self.lower_bound_link(key))
    }

    /// Return the first entry whose key is greater than `key`
    pub fn upper_bound(&self, key: &P::Key) -> Cursor {
        self.cursor(self.upper_bound_link(key))
    }

    /// Return the half-open span of entries whose key compares equal to `key`
    pub fn equal_range(&self, key: &P::Key) -> (Cursor, Cursor) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Insert a new entry.
    /// A unique tree that already holds an equal key is left untouched and the
    /// payload is handed back. In a multi tree the new entry goes after its
    /// equals
    pub fn insert(&mut self, payload: P) -> InsertResult<P> {
        // Descend to the insertion point
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.header.root;
        while let Some(id) = current {
            parent = current;
            side = match self.compare_at(payload.key(), id) {
                Ordering::Less => Side::Left,
                Ordering::Equal if self.mode == Mode::Unique => {
                    return InsertResult::Rejected {
                        existing: self.cursor(Some(id)),
                        payload,
                    };
                }
                _ => Side::Right,
            };
            current = self.node(id).child(side);
        }

        let mut node = Node::new(payload);
        node.parent = parent;
        let id = self.store.allocate(node);
        self.len += 1;

        match parent {
            None => {
                self.header.root = Some(id);
                self.header.most = [Some(id), Some(id)];
            }
            Some(parent) => {
                self.node_mut(parent).set_child(side, Some(id));
                // A new child on the outer side of an extreme becomes the new extreme
                if self.header.most(side) == Some(parent) {
                    self.header.set_most(side, Some(id));
                }
            }
        }

        self.insert_fixup(id);
        InsertResult::Inserted(self.cursor(Some(id)))
    }

    /// Remove every entry whose key compares equal to `key`.
    /// Return how many were removed
    pub fn erase(&mut self, key: &P::Key) -> usize {
        let (mut link, count) = match self.mode {
            Mode::Unique => {
                let found = self.find_link(key);
                (found, found.is_some() as usize)
            }
            Mode::Multi => {
                let first = self.lower_bound_link(key);
                (first, self.count_from(first, key))
            }
        };
        for _ in 0..count {
            if let Some(id) = link {
                link = self.erase_node(id).1;
            }
        }
        count
    }

    /// Remove exactly the entry at `cursor`
    pub fn erase_at(&mut self, cursor: Cursor) -> Result<Removed<P>> {
        let id = self.resolve(cursor)?.ok_or(TreeError::EraseOnEnd)?;
        let (payload, next) = self.erase_node(id);
        Ok(Removed {
            payload,
            next: self.cursor(next),
        })
    }

    /// Remove the half-open span `[beg, end)` and return its length.
    /// If `end` can't be reached from `beg` the tree is left untouched
    pub fn erase_range(&mut self, beg: Cursor, end: Cursor) -> Result<usize> {
        let stop = self.resolve(end)?;
        let mut link = self.resolve(beg)?;

        // Measure the span before touching anything
        let mut span = 0;
        while link != stop {
            let id = link.ok_or(TreeError::NoSuccessor)?;
            link = self.step(id, Side::Right);
            span += 1;
        }

        // Two-child removals move payloads between nodes, so `end` itself may
        // not survive: count instead of comparing against it
        let mut cursor = beg;
        for _ in 0..span {
            cursor = self.erase_at(cursor)?.next;
        }
        Ok(span)
    }

    /// Unlink one node and return its payload together with the position of
    /// the entry that followed it
    fn erase_node(&mut self, target: NodeId) -> (P, Link) {
        let mut node = target;
        let next;
        if self.node(target).has_two_children() {
            // The successor has no left child: move its payload up into the
            // target and unlink the successor's slot instead
            let successor = self.extreme_below(self.child(target, Side::Right), Side::Left);
            self.store.swap_payloads(target, successor);
            node = successor;
            next = Some(target);
        } else {
            next = self.step(node, Side::Right);
        }

        // Refresh the cached extremes while the node is still linked
        if self.header.most(Side::Left) == Some(node) {
            let successor = self.step(node, Side::Right);
            self.header.set_most(Side::Left, successor);
        }
        if self.header.most(Side::Right) == Some(node) {
            let predecessor = self.step(node, Side::Left);
            self.header.set_most(Side::Right, predecessor);
        }

        // Splice the single child (or the terminal) into the node's place
        let removed = self.node(node);
        let child = removed.child(Side::Left).or(removed.child(Side::Right));
        let parent = removed.parent;
        let color = removed.color;
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        self.replace_child(parent, node, child);

        let payload = self.store.release(node).into_payload();
        self.len -= 1;

        if color == Color::Black {
            self.erase_fixup(child, parent);
        }
        (payload, next)
    }

    fn find_link(&self, key: &P::Key) -> Link {
        let mut current = self.header.root;
        while let Some(id) = current {
            current = match self.compare_at(key, id) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.child(id, Side::Left),
                Ordering::Greater => self.child(id, Side::Right),
            };
        }
        None
    }

    fn lower_bound_link(&self, key: &P::Key) -> Link {
        self.bound_link(key, |ord| ord == Ordering::Greater)
    }

    fn upper_bound_link(&self, key: &P::Key) -> Link {
        self.bound_link(key, |ord| ord != Ordering::Less)
    }

    /// Descend right wherever `go_right` holds for `key` vs. the node key, then
    /// resolve from the last visited node: it is the bound itself, unless the
    /// descent left it on the right, where the bound is its successor
    fn bound_link<F>(&self, key: &P::Key, go_right: F) -> Link
    where
        F: Fn(Ordering) -> bool,
    {
        let mut last = None;
        let mut current = self.header.root;
        while let Some(id) = current {
            last = current;
            let side = if go_right(self.compare_at(key, id)) {
                Side::Right
            } else {
                Side::Left
            };
            current = self.child(id, side);
        }

        let id = last?;
        if go_right(self.compare_at(key, id)) {
            self.step(id, Side::Right)
        } else {
            Some(id)
        }
    }

    /// Count consecutive entries equal to `key`, starting from `link`
    fn count_from(&self, mut link: Link, key: &P::Key) -> usize {
        let mut count = 0;
        while let Some(id) = link {
            if self.compare_at(key, id) != Ordering::Equal {
                break;
            }
            count += 1;
            link = self.step(id, Side::Right);
        }
        count
    }

    fn compare_at(&self, key: &P::Key, id: NodeId) -> Ordering {
        self.comparator.compare(key, self.node(id).payload.key())
    }

    /// Check that the cursor belongs here and still points to a live node
    pub(super) fn resolve(&self, cursor: Cursor) -> Result<Link> {
        if cursor.tree != self.id {
            return Err(TreeError::CursorNotOwned);
        }
        match cursor.node {
            Some(id) if self.store.get(id).is_none() => Err(TreeError::Dangling),
            link => Ok(link),
        }
    }

    pub(super) fn cursor(&self, node: Link) -> Cursor {
        Cursor {
            tree: self.id,
            node,
        }
    }

    /// In-order neighbour of `id` on `side`, computed from the tree shape alone
    pub(super) fn step(&self, id: NodeId, side: Side) -> Link {
        if let Some(child) = self.child(id, side) {
            return Some(self.extreme_below(Some(child), !side));
        }
        // Climb while coming from the `side` child
        let mut node = id;
        loop {
            match self.node(node).parent {
                Some(parent) if self.child(parent, side) == Some(node) => node = parent,
                parent => return parent,
            }
        }
    }

    /// Follow `side` children from the given (non-terminal) subtree root
    pub(super) fn extreme_below(&self, link: Link, side: Side) -> NodeId {
        let mut id = self.live(link);
        while let Some(child) = self.child(id, side) {
            id = child;
        }
        id
    }

    pub(super) fn node(&self, id: NodeId) -> &Node<P> {
        match self.store.get(id) {
            Some(node) => node,
            None => unreachable!("tree links to vacant slot {:?}", id),
        }
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        match self.store.get_mut(id) {
            Some(node) => node,
            None => unreachable!("tree links to vacant slot {:?}", id),
        }
    }

    /// Unwrap a link that the red-black shape guarantees is not terminal
    pub(super) fn live(&self, link: Link) -> NodeId {
        match link {
            Some(id) => id,
            None => unreachable!("red-black shape broken: missing node"),
        }
    }

    pub(super) fn child(&self, id: NodeId, side: Side) -> Link {
        self.node(id).child(side)
    }

    pub(super) fn parent(&self, id: NodeId) -> Link {
        self.node(id).parent
    }

    /// Which child of `parent` the node `child` is
    pub(super) fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.child(parent, Side::Right) == Some(child) {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Terminal positions count as black
    pub(super) fn color_of(&self, link: Link) -> Color {
        match link {
            Some(id) => self.node(id).color,
            None => Color::Black,
        }
    }

    pub(super) fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }
}

impl<P> Default for RbTree<P, NaturalOrder, Arena<P>>
where
    P: Payload,
    P::Key: Ord,
{
    fn default() -> Self {
        RbTree::unique()
    }
}

impl<P: Clone, C: Clone, S: Clone> Clone for RbTree<P, C, S> {
    /// The copy is a distinct tree: cursors of one are not valid in the other
    fn clone(&self) -> Self {
        RbTree {
            header: self.header,
            len: self.len,
            mode: self.mode,
            comparator: self.comparator.clone(),
            store: self.store.clone(),
            id: TreeId::fresh(),
            marker: PhantomData,
        }
    }
}

impl<P, C, S> fmt::Debug for RbTree<P, C, S>
where
    P: Payload + fmt::Debug,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
