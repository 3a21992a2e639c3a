use std::fmt;

/// Misuse of the tree API detected at the call boundary.
///
/// None of these are ever produced by a corrupted tree: they all describe a
/// cursor that cannot be used for the requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// The cursor was created by another tree instance
    CursorNotOwned,
    /// Predecessor requested on the first entry (or on the end of an empty tree)
    NoPredecessor,
    /// Successor requested on the end position
    NoSuccessor,
    /// Erase requested on the end position
    EraseOnEnd,
    /// The cursor points to an entry that was removed since it was obtained
    Dangling,
}

pub type Result<T> = std::result::Result<T, TreeError>;

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            TreeError::CursorNotOwned => "cursor is not a node of this tree",
            TreeError::NoPredecessor => "begin of tree has no predecessor",
            TreeError::NoSuccessor => "end of tree has no successor",
            TreeError::EraseOnEnd => "can't erase the end of tree",
            TreeError::Dangling => "cursor refers to a removed entry",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for TreeError {}

/// A broken red-black tree invariant, as reported by `RbTree::validate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    RedRoot,
    /// A child's parent link does not point back to the node holding it
    BrokenParentLink { depth: usize },
    /// A red node has a red child
    RedRed { depth: usize },
    /// Two descent paths cross a different number of black nodes
    BlackHeight { expected: usize, found: usize },
    /// In-order traversal is not sorted (or repeats a key in unique mode)
    OutOfOrder { position: usize },
    /// The size counter disagrees with the number of reachable nodes
    SizeMismatch { counted: usize, recorded: usize },
    /// The cached minimum or maximum is not the true extreme
    StaleExtreme,
    /// The tree is deeper than any red-black tree can be
    TooDeep,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Violation::RedRoot => write!(f, "root is red"),
            Violation::BrokenParentLink { depth } => {
                write!(f, "parent link mismatch at depth {}", depth)
            }
            Violation::RedRed { depth } => write!(f, "red node with red child at depth {}", depth),
            Violation::BlackHeight { expected, found } => write!(
                f,
                "black-height mismatch: expected {}, found {}",
                expected, found
            ),
            Violation::OutOfOrder { position } => {
                write!(f, "in-order sequence breaks at position {}", position)
            }
            Violation::SizeMismatch { counted, recorded } => write!(
                f,
                "size is {} but {} nodes are reachable",
                recorded, counted
            ),
            Violation::StaleExtreme => write!(f, "leftmost/rightmost cache is stale"),
            Violation::TooDeep => write!(f, "tree height exceeds the red-black bound"),
        }
    }
}

impl std::error::Error for Violation {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            TreeError::NoSuccessor.to_string(),
            "end of tree has no successor"
        );
        assert_eq!(
            Violation::BlackHeight {
                expected: 2,
                found: 3
            }
            .to_string(),
            "black-height mismatch: expected 2, found 3"
        );
    }
}
