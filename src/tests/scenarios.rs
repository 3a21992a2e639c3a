use super::{init_logger, keys, tree_of};
use crate::{RbTree, TreeError};
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn unique_in_order() {
    init_logger();
    let tree = tree_of(true, &[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(keys(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.find(&6), tree.end());
    assert_eq!(tree.key(tree.find(&7)), Some(&7));
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn unique_rejects_duplicate() {
    init_logger();
    let mut tree = RbTree::unique();
    let first = tree.insert((5, "first"));
    assert!(first.is_inserted());

    let second = tree.insert((5, "second"));
    assert!(!second.is_inserted());
    assert_eq!(second.cursor(), first.cursor());
    match second {
        crate::InsertResult::Rejected { payload, .. } => assert_eq!(payload, (5, "second")),
        crate::InsertResult::Inserted(_) => unreachable!(),
    }
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.value(tree.find(&5)), Some(&"first"));
}

#[test]
fn multi_count_and_erase() {
    init_logger();
    let mut tree = tree_of(false, &[2, 2, 2]);
    assert_eq!(tree.count(&2), 3);
    assert_eq!(tree.count(&1), 0);
    assert_eq!(tree.erase(&2), 3);
    assert!(tree.is_empty());
    assert_eq!(tree.begin(), tree.end());
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn multi_erase_keeps_neighbours() {
    init_logger();
    let mut tree = tree_of(false, &[1, 3, 3, 2, 3, 4, 3, 0, 5]);
    assert_eq!(tree.erase(&3), 4);
    assert_eq!(keys(&tree), vec![0, 1, 2, 4, 5]);
    assert_eq!(tree.erase(&3), 0);
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn ascending_inserts_stay_balanced() {
    init_logger();
    let tree = tree_of(true, &[1, 2, 3, 4, 5, 6, 7]);
    assert!(tree.height() <= 2 * 3);
    assert_eq!(tree.validate(), Ok(()));

    let big = tree_of(true, &(0..10_000).collect::<Vec<_>>());
    // 2 * log2(n + 1)
    assert!(big.height() <= 2 * 14);
    assert_eq!(big.validate(), Ok(()));
}

#[test]
fn erase_root_until_empty() {
    init_logger();
    let mut tree = tree_of(true, &[4, 2, 6, 1, 3, 5, 7]);
    let mut expected = keys(&tree);
    while !tree.is_empty() {
        let root = tree.root();
        let key = *tree.key(root).unwrap();
        tree.erase_at(root).unwrap();
        expected.retain(|&k| k != key);

        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(keys(&tree), expected);
    }
    assert_eq!(tree.root(), tree.end());
}

#[test]
fn erase_everything_from_begin() {
    init_logger();
    let mut tree = tree_of(false, &[9, 1, 8, 2, 7, 3, 7, 4, 6, 5]);
    let mut cursor = tree.begin();
    let mut erased = 0;
    while cursor != tree.end() {
        cursor = tree.erase_at(cursor).unwrap().next;
        erased += 1;
        assert_eq!(tree.validate(), Ok(()));
    }
    assert_eq!(erased, 10);
    assert_eq!(tree.len(), 0);
}

#[test]
fn navigation_errors() {
    init_logger();
    let tree = tree_of(true, &[1, 2, 3]);
    assert_eq!(tree.prev(tree.begin()), Err(TreeError::NoPredecessor));
    assert_eq!(tree.next(tree.end()), Err(TreeError::NoSuccessor));
    assert_eq!(tree.key(tree.prev(tree.end()).unwrap()), Some(&3));
    assert_eq!(tree.begin().next(&tree).and_then(|c| c.prev(&tree)), Ok(tree.begin()));

    let empty = tree_of(true, &[]);
    assert_eq!(empty.prev(empty.end()), Err(TreeError::NoPredecessor));
}

#[test]
fn successor_predecessor_duality() {
    init_logger();
    let tree = tree_of(false, &[8, 3, 3, 10, 1, 6, 14, 4, 7, 13, 6]);
    let mut cursor = tree.begin();
    while !cursor.is_end() {
        let next = tree.next(cursor).unwrap();
        assert_eq!(tree.prev(next), Ok(cursor));
        if !next.is_end() {
            let back = tree.prev(next).unwrap();
            assert_eq!(tree.next(back), Ok(next));
        }
        cursor = next;
    }

    // Walk backwards from the end
    let mut backward = vec![];
    let mut cursor = tree.end();
    while let Ok(prev) = tree.prev(cursor) {
        backward.push(*tree.key(prev).unwrap());
        cursor = prev;
    }
    backward.reverse();
    assert_eq!(backward, keys(&tree));
}

#[test]
fn bounds_spans() {
    init_logger();
    let tree = tree_of(false, &[1, 3, 3, 3, 5, 7, 7]);
    for missing in vec![0, 2, 4, 6, 8] {
        let (lower, upper) = tree.equal_range(&missing);
        assert_eq!(lower, upper, "key {}", missing);
    }
    for (key, times) in vec![(1, 1), (3, 3), (5, 1), (7, 2)] {
        let (lower, upper) = tree.equal_range(&key);
        let span = tree.range(lower, upper).unwrap().count();
        assert_eq!(span, times, "key {}", key);
        assert_eq!(tree.count(&key), times);
    }
}

#[test]
fn custom_comparator() {
    init_logger();
    // Case-insensitive names
    let by_name = |a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase());
    let mut tree = RbTree::with_comparator(crate::Mode::Unique, by_name);
    tree.insert((String::from("bob"), 1));
    tree.insert((String::from("Alice"), 2));
    assert!(!tree.insert((String::from("BOB"), 3)).is_inserted());

    let names = tree.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Alice", "bob"]);
    assert_eq!(tree.value(tree.find(&String::from("ALICE"))), Some(&2));
}

static DROPPED: AtomicUsize = AtomicUsize::new(0);

struct Counted(i32);

impl Drop for Counted {
    fn drop(&mut self) {
        DROPPED.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn clear_releases_every_payload() {
    init_logger();
    let mut tree = RbTree::unique();
    for i in 0..64 {
        tree.insert((i, Counted(i)));
    }
    let before = DROPPED.load(Ordering::SeqCst);
    tree.clear();
    assert_eq!(DROPPED.load(Ordering::SeqCst) - before, 64);
    assert!(tree.is_empty());
    assert_eq!(tree.validate(), Ok(()));

    // Removed payloads are moved out, not dropped
    tree.insert((1, Counted(1)));
    let removed = tree.erase_at(tree.begin()).unwrap();
    assert_eq!((removed.payload.1).0, 1);
}
