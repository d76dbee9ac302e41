//! Benchmark profiles for the ringtree workspace.
//!
//! Provides pre-built trees for benchmarking:
//!
//! - [`left_spine`]: a binary tree that is one long left spine
//! - [`random_tree`]: a tree of any stride grown along seeded random paths
//! - [`random_paths`]: the deterministic paths behind [`random_tree`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ringtree::{ArenaConfig, BinaryTree, Cursor, Tree};

/// Build a binary tree whose nodes all hang off the root's left spine.
///
/// Returns the tree and a cursor at the deepest node. Depth `d` forces the
/// arena to `d + 1` rings, so this profile stresses growth more than node
/// count.
pub fn left_spine(depth: u32) -> (BinaryTree<u64>, Cursor) {
    let mut tree = BinaryTree::with_rings(1);
    let mut at = tree.set_root(0).unwrap();
    for d in 1..=depth {
        at = at.insert_left(&mut tree, u64::from(d)).unwrap();
    }
    (tree, at)
}

/// Generate `count` deterministic descent paths of at most `max_depth` steps.
///
/// Each step is a child slot below `stride`, drawn from a simple LCG seeded
/// with `seed`.
pub fn random_paths(stride: u32, count: usize, max_depth: u32, seed: u64) -> Vec<Vec<usize>> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };
    (0..count)
        .map(|_| {
            let depth = next() % (max_depth as usize + 1);
            (0..depth).map(|_| next() % stride as usize).collect()
        })
        .collect()
}

/// Grow a tree along [`random_paths`], creating missing nodes only.
///
/// Payloads are insertion order starting from 0 at the root.
pub fn random_tree(stride: u32, count: usize, max_depth: u32, seed: u64) -> Tree<u64> {
    let mut tree = Tree::new(&ArenaConfig::new(stride)).unwrap();
    let root = tree.set_root(0).unwrap();
    let mut payload = 1;
    for path in random_paths(stride, count, max_depth, seed) {
        let mut at = root;
        for k in path {
            let child = at.child(&tree, k);
            at = if child.is_empty() {
                payload += 1;
                at.insert_child(&mut tree, k, payload - 1).unwrap()
            } else {
                child
            };
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_spine_reaches_depth() {
        let (tree, deepest) = left_spine(10);
        assert_eq!(tree.len(), 11);
        assert_eq!(deepest.get(&tree), Some(&10));
        assert_eq!(tree.rings(), 11);
    }

    #[test]
    fn random_paths_are_deterministic() {
        let a = random_paths(4, 50, 6, 42);
        let b = random_paths(4, 50, 6, 42);
        assert_eq!(a, b);
        assert!(a.iter().flatten().all(|&k| k < 4));
        assert!(a.iter().all(|p| p.len() <= 6));
    }

    #[test]
    fn random_tree_payloads_are_unique() {
        let tree = random_tree(3, 100, 5, 7);
        let mut payloads: Vec<u64> = tree.iter().map(|v| *v.payload).collect();
        let n = payloads.len();
        payloads.sort_unstable();
        payloads.dedup();
        assert_eq!(payloads.len(), n);
    }
}
