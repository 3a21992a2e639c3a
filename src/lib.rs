//! An embeddable ordered index built on a red-black tree.
//!
//! The tree keeps payloads sorted by a key projected from them, in either
//! unique (map/set) or multi (multimap/multiset) mode. Positions are exposed
//! as [`Cursor`] handles supporting successor/predecessor navigation, and all
//! searches, insertions and removals run in O(log n).
//!
//! ```
//! use rbtree_index::RbTree;
//!
//! let mut tree = RbTree::unique();
//! for key in vec![5, 3, 8, 1] {
//!     tree.insert((key, key * 10));
//! }
//! let cursor = tree.lower_bound(&4);
//! assert_eq!(tree.get(cursor), Some(&(5, 50)));
//! assert_eq!(tree.key(tree.next(cursor).unwrap()), Some(&8));
//! ```
//!
//! The engine does no locking: share a tree across threads only behind an
//! external lock, and treat every cursor as invalidated by any insertion or
//! removal.

#[cfg(test)]
mod tests;

pub mod compare;

pub mod error;

pub mod rbtree;

pub use compare::{Comparator, NaturalOrder, Payload, Reversed};
pub use error::{Result, TreeError, Violation};
pub use rbtree::{
    Arena, Color, Cursor, InsertResult, Mode, Node, NodeId, NodeStore, RbTree, Removed, TreeId,
};
