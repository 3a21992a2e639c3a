use super::{Color, Link, Side};

/// Stable handle to a node inside a `NodeStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// One stored entry: tree linkage plus the caller's payload
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub(super) child: [Link; 2],
    pub(super) parent: Link,
    pub(super) color: Color,
    pub(super) payload: P,
}

impl<P> Node<P> {
    /// Build a detached red node, as every insertion starts with
    pub fn new(payload: P) -> Self {
        Node {
            child: [None, None],
            parent: None,
            color: Color::Red,
            payload,
        }
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub(super) fn child(&self, side: Side) -> Link {
        self.child[side.index()]
    }

    pub(super) fn set_child(&mut self, side: Side, link: Link) {
        self.child[side.index()] = link;
    }

    pub(super) fn has_two_children(&self) -> bool {
        self.child[0].is_some() && self.child[1].is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn create_node() {
        let mut node = Node::new((1, "one"));
        assert_eq!(node.color(), Color::Red);
        assert_eq!(node.child(Side::Left), None);
        assert_eq!(node.parent, None);
        assert!(!node.has_two_children());

        node.set_child(Side::Right, Some(NodeId(7)));
        node.set_child(Side::Left, Some(NodeId(3)));
        assert_eq!(node.child(!Side::Left), Some(NodeId(7)));
        assert!(node.has_two_children());
        assert_eq!(node.into_payload(), (1, "one"));
    }
}
