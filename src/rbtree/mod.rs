mod cursor;
mod node;
mod rebalance;
mod store;
mod tree;
mod tree_iter;
mod validate;

pub use cursor::{Cursor, TreeId};
pub use node::{Node, NodeId};
pub use store::{Arena, NodeStore};
pub use tree::RbTree;
pub use tree_iter::{IntoIter, Iter, Range};

use std::ops::Not;

/// A child or parent slot. `None` is the terminal position (the header)
pub type Link = Option<NodeId>;

// Deepest possible red-black tree: 2 * log2(n + 1) with n bounded by usize
const MAX_HEIGHT: usize = 2 * (std::mem::size_of::<usize>() * 8) + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Which child of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    fn index(self) -> usize {
        self as usize
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Whether the tree rejects duplicate keys (set/map) or keeps them (multiset/multimap).
/// Fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Unique,
    Multi,
}

/// Outcome of `RbTree::insert`
#[derive(Debug)]
pub enum InsertResult<P> {
    Inserted(Cursor),
    /// An equal key already exists in a unique tree: nothing was changed and
    /// the payload is handed back
    Rejected { existing: Cursor, payload: P },
}

impl<P> InsertResult<P> {
    pub fn is_inserted(&self) -> bool {
        match self {
            InsertResult::Inserted(_) => true,
            InsertResult::Rejected { .. } => false,
        }
    }

    /// The new entry, or the existing equal one
    pub fn cursor(&self) -> Cursor {
        match *self {
            InsertResult::Inserted(cursor) => cursor,
            InsertResult::Rejected { existing, .. } => existing,
        }
    }
}

/// An entry taken out of the tree by `RbTree::erase_at`
#[derive(Debug)]
pub struct Removed<P> {
    pub payload: P,
    /// The entry that followed the removed one (possibly the end)
    pub next: Cursor,
}
