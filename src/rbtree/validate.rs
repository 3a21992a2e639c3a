use super::*;
use crate::compare::{Comparator, Payload};
use crate::error::Violation;
use arrayvec::ArrayVec;
use std::cmp::Ordering;

impl<P, C, S> RbTree<P, C, S>
where
    P: Payload,
    C: Comparator<P::Key>,
    S: NodeStore<P>,
{
    /// Check every red-black and bookkeeping invariant of the tree.
    /// This walks the whole tree, so it costs O(n)
    pub fn validate(&self) -> Result<(), Violation> {
        let root = match self.header.root {
            None => {
                if self.len != 0 {
                    return Err(Violation::SizeMismatch {
                        counted: 0,
                        recorded: self.len,
                    });
                }
                if self.header.most != [None, None] {
                    return Err(Violation::StaleExtreme);
                }
                return Ok(());
            }
            Some(root) => root,
        };
        if self.color_of(Some(root)) == Color::Red {
            return Err(Violation::RedRoot);
        }
        if self.parent(root).is_some() {
            return Err(Violation::BrokenParentLink { depth: 0 });
        }

        self.check_shape(root)?;
        self.check_order()?;

        let leftmost = self.extreme_below(Some(root), Side::Left);
        let rightmost = self.extreme_below(Some(root), Side::Right);
        if self.header.most != [Some(leftmost), Some(rightmost)] {
            return Err(Violation::StaleExtreme);
        }
        Ok(())
    }

    /// Depth-first walk checking links, colors, black-height and node count.
    /// The stack never holds more than one pending sibling per level
    fn check_shape(&self, root: NodeId) -> Result<(), Violation> {
        let mut stack: ArrayVec<(NodeId, usize, usize), MAX_HEIGHT> = ArrayVec::new();
        stack.push((root, 0, 0));
        let mut black_height = None;
        let mut counted = 0;

        while let Some((id, depth, blacks_above)) = stack.pop() {
            counted += 1;
            let node = self.node(id);
            let blacks = blacks_above + (node.color == Color::Black) as usize;

            for &side in Side::BOTH.iter() {
                match node.child(side) {
                    Some(child) => {
                        if self.parent(child) != Some(id) {
                            return Err(Violation::BrokenParentLink { depth: depth + 1 });
                        }
                        if node.color == Color::Red && self.color_of(Some(child)) == Color::Red {
                            return Err(Violation::RedRed { depth });
                        }
                        stack
                            .try_push((child, depth + 1, blacks))
                            .map_err(|_| Violation::TooDeep)?;
                    }
                    // Every path to a terminal must cross the same number of black nodes
                    None => match black_height {
                        None => black_height = Some(blacks),
                        Some(expected) if expected != blacks => {
                            return Err(Violation::BlackHeight {
                                expected,
                                found: blacks,
                            });
                        }
                        Some(_) => {}
                    },
                }
            }
        }

        if counted != self.len {
            return Err(Violation::SizeMismatch {
                counted,
                recorded: self.len,
            });
        }
        Ok(())
    }

    /// In-order keys must not decrease, and must strictly increase in a unique tree
    fn check_order(&self) -> Result<(), Violation> {
        let mut previous: Option<&P::Key> = None;
        for (position, payload) in self.iter().enumerate() {
            let key = payload.key();
            if let Some(previous) = previous {
                match self.comparator().compare(previous, key) {
                    Ordering::Greater => return Err(Violation::OutOfOrder { position }),
                    Ordering::Equal if self.is_unique() => {
                        return Err(Violation::OutOfOrder { position })
                    }
                    _ => {}
                }
            }
            previous = Some(key);
        }
        Ok(())
    }
}
