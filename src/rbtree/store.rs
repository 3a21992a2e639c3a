use super::node::{Node, NodeId};

/// Storage for tree nodes: the tree asks it for a new slot on every insertion
/// and hands the slot back on every removal, so an implementation is free to
/// pool or free the memory.
///
/// An id returned by `allocate` must stay valid (and keep addressing the same
/// node) until it is passed to `release`.
pub trait NodeStore<P> {
    fn allocate(&mut self, node: Node<P>) -> NodeId;

    /// Take a node out of the store. Panics if `id` is vacant
    fn release(&mut self, id: NodeId) -> Node<P>;

    fn get(&self, id: NodeId) -> Option<&Node<P>>;

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<P>>;

    /// Exchange the payloads of two distinct nodes, leaving their links in place
    fn swap_payloads(&mut self, a: NodeId, b: NodeId);
}

#[derive(Debug, Clone)]
enum Slot<P> {
    Occupied(Node<P>),
    /// Vacant slot, linked to the next vacant one
    Vacant(Option<usize>),
}

/// The default store: a growable vector of slots.
/// Released slots are chained into a free list and reused by later insertions
#[derive(Debug, Clone)]
pub struct Arena<P> {
    slots: Vec<Slot<P>>,
    free_head: Option<usize>,
    len: usize,
}

impl<P> Arena<P> {
    pub fn new() -> Self {
        Arena::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Return the number of occupied slots
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the number of slots (occupied or not) that can be held without reallocating
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        let free = self.slots.len() - self.len;
        if additional > free {
            self.slots.reserve(additional - free);
        }
    }
}

impl<P> Default for Arena<P> {
    fn default() -> Self {
        Arena::new()
    }
}

impl<P> NodeStore<P> for Arena<P> {
    fn allocate(&mut self, node: Node<P>) -> NodeId {
        self.len += 1;
        match self.free_head {
            Some(index) => {
                // Reuse a released slot
                if let Slot::Vacant(next) = self.slots[index] {
                    self.free_head = next;
                }
                self.slots[index] = Slot::Occupied(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<P> {
        let vacant = Slot::Vacant(self.free_head);
        match std::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id.0);
                self.len -= 1;
                node
            }
            Slot::Vacant(next) => {
                // Undo the write before reporting the double release
                self.slots[id.0] = Slot::Vacant(next);
                panic!("release of vacant slot {}", id.0)
            }
        }
    }

    fn get(&self, id: NodeId) -> Option<&Node<P>> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<P>> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn swap_payloads(&mut self, a: NodeId, b: NodeId) {
        assert_ne!(a, b);
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.slots.split_at_mut(high);
        match (&mut head[low], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => std::mem::swap(&mut x.payload, &mut y.payload),
            _ => panic!("payload swap involving a vacant slot"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reuse_released_slots() {
        let mut arena = Arena::new();
        let a = arena.allocate(Node::new('a'));
        let b = arena.allocate(Node::new('b'));
        let c = arena.allocate(Node::new('c'));
        assert_eq!(arena.len(), 3);

        assert_eq!(arena.release(b).into_payload(), 'b');
        assert_eq!(arena.release(a).into_payload(), 'a');
        assert!(arena.get(a).is_none());
        assert_eq!(arena.len(), 1);

        // Last released slot is reused first
        assert_eq!(arena.allocate(Node::new('d')), a);
        assert_eq!(arena.allocate(Node::new('e')), b);
        assert_eq!(arena.allocate(Node::new('f')), NodeId(3));
        assert_eq!(arena.get(c).map(|n| *n.payload()), Some('c'));
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn swap_payloads() {
        let mut arena = Arena::new();
        let a = arena.allocate(Node::new(1));
        let b = arena.allocate(Node::new(2));
        arena.get_mut(a).unwrap().parent = Some(b);
        arena.swap_payloads(b, a);
        assert_eq!(*arena.get(a).unwrap().payload(), 2);
        assert_eq!(*arena.get(b).unwrap().payload(), 1);
        assert_eq!(arena.get(a).unwrap().parent, Some(b));
    }

    #[test]
    fn reserve_counts_free_slots() {
        let mut arena = Arena::with_capacity(4);
        assert!(arena.capacity() >= 4);
        let ids: Vec<NodeId> = (0..4).map(|v| arena.allocate(Node::new(v))).collect();
        arena.release(ids[1]);
        arena.release(ids[2]);

        // Two vacant slots already cover two more nodes
        let capacity = arena.capacity();
        arena.reserve(2);
        assert_eq!(arena.capacity(), capacity);

        arena.reserve(10);
        assert!(arena.capacity() >= 12);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic]
    fn double_release() {
        let mut arena = Arena::new();
        let a = arena.allocate(Node::new(1));
        arena.release(a);
        arena.release(a);
    }
}
