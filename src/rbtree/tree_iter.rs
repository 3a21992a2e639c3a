use super::*;
use crate::compare::{Comparator, NaturalOrder, Payload};
use crate::error::Result;
use std::iter::FusedIterator;

/// A sorted iterator over references to the payloads of a tree
pub struct Iter<'a, P, C, S> {
    tree: &'a RbTree<P, C, S>,
    /// Next node to yield from the front
    front: Link,
    /// Next node to yield from the back
    back: Link,
    len: usize,
}

/// Iterate over the payloads of a cursor span `[beg, end)`, in key order
pub struct Range<'a, P, C, S> {
    tree: &'a RbTree<P, C, S>,
    current: Link,
    end: Link,
}

/// A sorted owning iterator, emptying the tree from its minimum
pub struct IntoIter<P, C, S> {
    tree: RbTree<P, C, S>,
}

impl<P, C, S> RbTree<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    /// Return a sorted iterator over references to the payloads
    pub fn iter(&self) -> Iter<P, C, S> {
        Iter {
            tree: self,
            front: self.header.most(Side::Left),
            back: self.header.most(Side::Right),
            len: self.len,
        }
    }

    /// Return an iterator over `[beg, end)`. Both cursors must belong to this
    /// tree and refer to live positions.
    ///
    /// The span is not measured up front: when `end` does not follow `beg`,
    /// iteration stops at the last entry instead of failing like `erase_range`
    pub fn range(&self, beg: Cursor, end: Cursor) -> Result<Range<P, C, S>> {
        Ok(Range {
            tree: self,
            current: self.resolve(beg)?,
            end: self.resolve(end)?,
        })
    }

    /// Return an iterator over the entries whose key compares equal to `key`
    pub fn equal(&self, key: &P::Key) -> Range<P, C, S> {
        let (beg, end) = self.equal_range(key);
        Range {
            tree: self,
            current: beg.node,
            end: end.node,
        }
    }
}

impl<'a, P, C, S> Iterator for Iter<'a, P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let id = self.tree.live(self.front);
        self.len -= 1;
        self.front = self.tree.step(id, Side::Right);
        Some(&self.tree.node(id).payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, P, C, S> DoubleEndedIterator for Iter<'a, P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let id = self.tree.live(self.back);
        self.len -= 1;
        self.back = self.tree.step(id, Side::Left);
        Some(&self.tree.node(id).payload)
    }
}

impl<'a, P, C, S> ExactSizeIterator for Iter<'a, P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
}

impl<'a, P, C, S> FusedIterator for Iter<'a, P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
}

impl<'a, P, C, S> Iterator for Range<'a, P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.end {
            return None;
        }
        // Walking off the last entry without meeting `end` ends the span
        let id = self.current?;
        self.current = self.tree.step(id, Side::Right);
        Some(&self.tree.node(id).payload)
    }
}

impl<'a, P, C, S> FusedIterator for Range<'a, P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
}

impl<P, C, S> Iterator for IntoIter<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    type Item = P;

    fn next(&mut self) -> Option<P> {
        // The minimum has no left child: its removal never moves payloads
        let first = self.tree.begin();
        self.tree.erase_at(first).ok().map(|removed| removed.payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<P, C, S> ExactSizeIterator for IntoIter<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
}

impl<P, C, S> IntoIterator for RbTree<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    type Item = P;
    type IntoIter = IntoIter<P, C, S>;

    fn into_iter(self) -> IntoIter<P, C, S> {
        IntoIter { tree: self }
    }
}

impl<'a, P, C, S> IntoIterator for &'a RbTree<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    type Item = &'a P;
    type IntoIter = Iter<'a, P, C, S>;

    fn into_iter(self) -> Iter<'a, P, C, S> {
        self.iter()
    }
}

impl<P, C, S> Extend<P> for RbTree<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    /// Insert every payload; in a unique tree the later duplicates are dropped
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for payload in iter {
            self.insert(payload);
        }
    }
}

impl<P> std::iter::FromIterator<P> for RbTree<P, NaturalOrder, Arena<P>>
where
    P: Payload,
    P::Key: Ord,
{
    /// Build a unique tree: the first of several equal keys is kept
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = RbTree::with_store(
            Mode::Unique,
            NaturalOrder,
            Arena::with_capacity(iter.size_hint().0),
        );
        tree.extend(iter);
        tree
    }
}
