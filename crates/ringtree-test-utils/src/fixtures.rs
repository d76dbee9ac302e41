//! Reusable tree fixtures.
//!
//! - [`scenario`]: the reference binary tree used across integration tests.
//! - [`full_tree`]: every slot of the first `rings` rings populated, with
//!   each node's payload equal to its flat index.

use ringtree::{ArenaConfig, BinaryTree, Cursor, Tree};

/// The reference binary tree and cursors at its interesting nodes.
///
/// ```text
///                 2 (0,0)
///          8 (1,1)        7 (1,0)
///     2 (2,3)  4 (2,2)        3 (2,0)
///  5 (3,7)                        9 (3,0)
/// ```
///
/// Left children are drawn on the left. Because "left" is child slot 1,
/// the left child of `(r, b)` is `(r + 1, 2b + 1)`.
pub struct Scenario {
    pub tree: BinaryTree<i32>,
    pub root: Cursor,
    /// The root's left child, payload 8.
    pub inner: Cursor,
    /// Deepest node on the left spine, payload 5.
    pub deep_left: Cursor,
    /// The root's right child, payload 7.
    pub right: Cursor,
    /// Deepest node on the right spine, payload 9.
    pub deep_right: Cursor,
}

/// Build the reference scenario.
///
/// `set_root(2)`; `i = root.left(8)`; `i.left(2).left(5)`; `i.right(4)`;
/// `root.right(7).right(3).right(9)`.
pub fn scenario() -> Scenario {
    let mut tree = BinaryTree::new();
    let root = tree.set_root(2).unwrap();
    let inner = root.insert_left(&mut tree, 8).unwrap();
    let deep_left = inner
        .insert_left(&mut tree, 2)
        .and_then(|c| c.insert_left(&mut tree, 5))
        .unwrap();
    inner.insert_right(&mut tree, 4).unwrap();
    let right = root.insert_right(&mut tree, 7).unwrap();
    let deep_right = right
        .insert_right(&mut tree, 3)
        .and_then(|c| c.insert_right(&mut tree, 9))
        .unwrap();
    Scenario {
        tree,
        root,
        inner,
        deep_left,
        right,
        deep_right,
    }
}

/// A tree of the given stride with every slot of `rings` rings populated.
///
/// Payloads are flat indices, so `tree.search(&i)` lands on slot `i`.
pub fn full_tree(stride: u32, rings: u32) -> Tree<usize> {
    let config = ArenaConfig::new(stride).with_initial_rings(rings.max(1));
    let mut tree = Tree::new(&config).unwrap();
    let root = tree.set_root(0).unwrap();
    let mut frontier = vec![root];
    for _ in 1..rings {
        let mut next = Vec::with_capacity(frontier.len() * stride as usize);
        for parent in frontier {
            for k in 0..stride as usize {
                let child = parent.insert_child(&mut tree, k, 0).unwrap();
                let index = child.reference().unwrap().index();
                *child.get_mut(&mut tree).unwrap() = index;
                next.push(child);
            }
        }
        frontier = next;
    }
    tree
}
