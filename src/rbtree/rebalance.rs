use super::*;
use crate::compare::{Comparator, Payload};
use log::trace;

impl<P, C, S> RbTree<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    /// Lift `pivot` into its parent's place. The former parent becomes the
    /// `side` child of `pivot` and adopts pivot's old `side` subtree.
    ///
    /// With `Side::Left` this is a left rotation around the parent (pivot was
    /// its right child), with `Side::Right` a right rotation.
    pub(super) fn rotate(&mut self, side: Side, pivot: NodeId) {
        let parent = self.live(self.parent(pivot));
        let grandpa = self.parent(parent);
        let inner = self.child(pivot, side);

        self.node_mut(pivot).set_child(side, Some(parent));
        self.node_mut(parent).set_child(!side, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(parent);
        }
        self.node_mut(parent).parent = Some(pivot);
        self.node_mut(pivot).parent = grandpa;
        self.replace_child(grandpa, parent, Some(pivot));
    }

    /// Make `parent` (or the header, for `None`) point to `new` where it pointed to `old`
    pub(super) fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.header.root = new,
            Some(parent) => {
                let side = self.side_of(parent, old);
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    /// Restore the red-black shape after linking the red node `node`
    pub(super) fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = match self.parent(node) {
                None => {
                    trace!("insert case 1: paint root black");
                    self.set_color(node, Color::Black);
                    return;
                }
                Some(parent) => parent,
            };
            if self.color_of(Some(parent)) == Color::Black {
                trace!("insert case 2: black parent");
                return;
            }

            // A red parent is never the root, so the grandparent exists and is black
            let grandpa = self.live(self.parent(parent));
            let parent_side = self.side_of(grandpa, parent);
            let uncle = self.child(grandpa, !parent_side);

            if self.color_of(uncle) == Color::Red {
                trace!("insert case 3: red uncle");
                self.set_color(parent, Color::Black);
                self.set_color(self.live(uncle), Color::Black);
                self.set_color(grandpa, Color::Red);
                node = grandpa;
                continue;
            }

            let mut parent = parent;
            if self.side_of(parent, node) != parent_side {
                trace!("insert case 4: inner child");
                self.rotate(parent_side, node);
                // `node` took its parent's place
                parent = node;
            }

            trace!("insert case 5: outer child");
            self.set_color(parent, Color::Black);
            self.set_color(grandpa, Color::Red);
            self.rotate(!parent_side, parent);
            return;
        }
    }

    /// Restore the red-black shape after unlinking a black node. `node` is the
    /// child that took its place (possibly terminal) under `parent`; its side
    /// of the tree is one black node short
    pub(super) fn erase_fixup(&mut self, mut node: Link, mut parent: Link) {
        loop {
            let parent_id = match parent {
                None => {
                    trace!("erase case 1: replacement is root");
                    if let Some(root) = node {
                        self.set_color(root, Color::Black);
                    }
                    return;
                }
                Some(parent_id) => parent_id,
            };
            if self.color_of(node) == Color::Red {
                trace!("erase case 2: red replacement");
                self.set_color(self.live(node), Color::Black);
                return;
            }

            let side = if self.child(parent_id, Side::Left) == node {
                Side::Left
            } else {
                Side::Right
            };
            // The other side holds at least one more black node, so it can't be terminal
            let brother = self.live(self.child(parent_id, !side));
            let near = self.child(brother, side);
            let far = self.child(brother, !side);

            if self.color_of(parent) == Color::Red {
                // With a red parent the brother is black
                if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                    trace!("erase case 3: red parent, black nephews");
                    self.set_color(brother, Color::Red);
                    self.set_color(parent_id, Color::Black);
                } else if self.color_of(near) == Color::Red {
                    trace!("erase case 4: red parent, red near nephew");
                    let near = self.live(near);
                    self.set_color(parent_id, Color::Black);
                    self.rotate(!side, near);
                    self.rotate(side, near);
                } else {
                    trace!("erase case 5: red parent, red far nephew");
                    self.rotate(side, brother);
                }
                return;
            }

            if self.color_of(Some(brother)) == Color::Red {
                trace!("erase case 6: black parent, red brother");
                self.set_color(brother, Color::Black);
                self.set_color(parent_id, Color::Red);
                self.rotate(side, brother);
                // Same node, now under a red parent
                continue;
            }

            if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                trace!("erase case 7: black parent, brother and nephews");
                self.set_color(brother, Color::Red);
                node = parent;
                parent = self.parent(parent_id);
                continue;
            }

            if self.color_of(near) == Color::Red {
                trace!("erase case 8: black parent, red near nephew");
                let near = self.live(near);
                self.set_color(near, Color::Black);
                self.rotate(!side, near);
                self.rotate(side, near);
            } else {
                trace!("erase case 9: black parent, red far nephew");
                self.set_color(self.live(far), Color::Black);
                self.rotate(side, brother);
            }
            return;
        }
    }
}
