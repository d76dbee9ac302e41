//! Binary (stride 2) specialization.
//!
//! Children are named rather than numbered. The offsets are asymmetric:
//! the left child of `(ring, branch)` sits at `(ring + 1, branch * 2 + 1)`
//! and the right child at `(ring + 1, branch * 2)`, so "left" is child slot
//! [`LEFT`] = 1 and "right" is child slot [`RIGHT`] = 0. Every traversal
//! (`each`, `each_with`, `iter`) visits left before right.

use std::ops::{Deref, DerefMut};

use ringtree_arena::ArenaConfig;
use ringtree_core::Stride;

use crate::cursor::Cursor;
use crate::error::TreeError;
use crate::tree::Tree;

/// Child slot of the left child.
pub const LEFT: usize = 1;

/// Child slot of the right child.
pub const RIGHT: usize = 0;

/// A [`Tree`] with two children per node.
///
/// Dereferences to [`Tree`] for everything that does not depend on child
/// naming (`set_root`, `search`, `path`, `clear`, ...).
///
/// # Examples
///
/// ```
/// use ringtree::{BinaryTree, Step};
///
/// let mut tree = BinaryTree::new();
/// let root = tree.set_root(2).unwrap();
/// let left = root.insert_left(&mut tree, 8).unwrap();
/// left.insert_left(&mut tree, 5).unwrap();
///
/// let end = tree.path(|_| Step::LEFT);
/// assert_eq!(end.get(&tree), Some(&5));
/// ```
#[derive(Debug)]
pub struct BinaryTree<T> {
    tree: Tree<T>,
}

impl<T> BinaryTree<T> {
    /// Create an empty binary tree with the default ring count.
    pub fn new() -> Self {
        Self::with_rings(ArenaConfig::DEFAULT_INITIAL_RINGS)
    }

    /// Create an empty binary tree reserving `rings` rings on first use.
    pub fn with_rings(rings: u32) -> Self {
        let tree = Tree::from_stride(Stride::BINARY, rings);
        Self {
            tree: tree.with_order(&[LEFT, RIGHT]),
        }
    }

    /// Create a binary tree from a config whose stride must be 2.
    pub fn from_config(config: &ArenaConfig) -> Result<Self, TreeError> {
        let tree = Tree::new(config)?;
        if tree.stride() != Stride::BINARY {
            return Err(TreeError::StrideMismatch {
                expected: Stride::BINARY.get(),
                found: tree.stride().get(),
            });
        }
        Ok(Self {
            tree: tree.with_order(&[LEFT, RIGHT]),
        })
    }

    /// The underlying generic tree.
    pub fn into_inner(self) -> Tree<T> {
        self.tree
    }
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for BinaryTree<T> {
    type Target = Tree<T>;

    fn deref(&self) -> &Tree<T> {
        &self.tree
    }
}

impl<T> DerefMut for BinaryTree<T> {
    fn deref_mut(&mut self) -> &mut Tree<T> {
        &mut self.tree
    }
}

/// Named-child navigation for binary trees.
impl Cursor {
    /// Cursor at the left child, or empty.
    pub fn left<T>(&self, tree: &BinaryTree<T>) -> Cursor {
        self.child(tree, LEFT)
    }

    /// Cursor at the right child, or empty.
    pub fn right<T>(&self, tree: &BinaryTree<T>) -> Cursor {
        self.child(tree, RIGHT)
    }

    /// Create the left child holding `value`.
    pub fn insert_left<T>(
        &self,
        tree: &mut BinaryTree<T>,
        value: T,
    ) -> Result<Cursor, TreeError> {
        self.insert_child(tree, LEFT, value)
    }

    /// Create the right child holding `value`.
    pub fn insert_right<T>(
        &self,
        tree: &mut BinaryTree<T>,
        value: T,
    ) -> Result<Cursor, TreeError> {
        self.insert_child(tree, RIGHT, value)
    }

    /// Whether the left child is set.
    pub fn has_left<T>(&self, tree: &BinaryTree<T>) -> bool {
        self.has_child(tree, LEFT)
    }

    /// Whether the right child is set.
    pub fn has_right<T>(&self, tree: &BinaryTree<T>) -> bool {
        self.has_child(tree, RIGHT)
    }

    /// Move this cursor to its left child in place.
    pub fn step_left<T>(&mut self, tree: &BinaryTree<T>) -> &mut Self {
        self.step_child(tree, LEFT)
    }

    /// Move this cursor to its right child in place.
    pub fn step_right<T>(&mut self, tree: &BinaryTree<T>) -> &mut Self {
        self.step_child(tree, RIGHT)
    }
}
