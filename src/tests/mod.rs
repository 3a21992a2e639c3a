mod scenarios;

use crate::RbTree;
use std::sync::Once;

static LOGGER: Once = Once::new();

/// Route the tree's log output through the test harness
fn init_logger() {
    LOGGER.call_once(|| {
        let _ = simplelog::TestLogger::init(
            simplelog::LevelFilter::Debug,
            simplelog::Config::default(),
        );
    });
}

fn keys<V>(tree: &RbTree<(i32, V)>) -> Vec<i32> {
    tree.iter().map(|(k, _)| *k).collect()
}

fn tree_of(unique: bool, values: &[i32]) -> RbTree<(i32, ())> {
    let mut tree = if unique {
        RbTree::unique()
    } else {
        RbTree::multi()
    };
    for &v in values {
        tree.insert((v, ()));
    }
    tree
}
