//! Quaternary (stride 4) specialization.
//!
//! Children are addressed by [`Quadrant`], which maps one to one onto child
//! slots 0..4. Directed descent uses [`Step::Descend`] with a quadrant's
//! index, since a signed two-way continuation cannot name four children.
//!
//! Whether [`QuadTree::each`] and [`QuadTree::path`] recurse is selected by
//! [`Traversal`]. [`Traversal::Recursive`] (the default) visits every
//! quadrant in ascending order; [`Traversal::RootOnly`] visits the root and
//! nothing else.

use std::fmt;
use std::ops::{Deref, DerefMut};

use ringtree_arena::ArenaConfig;
use ringtree_core::Stride;

use crate::cursor::Cursor;
use crate::error::TreeError;
use crate::tree::{PreOrder, Tree};
use crate::visit::{Flow, Step, Traversal, Visit};

/// One of the four children of a quad-tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    /// Child slot 0.
    Q0,
    /// Child slot 1.
    Q1,
    /// Child slot 2.
    Q2,
    /// Child slot 3.
    Q3,
}

impl Quadrant {
    /// All quadrants in slot order.
    pub const ALL: [Quadrant; 4] = [Self::Q0, Self::Q1, Self::Q2, Self::Q3];

    /// Child slot of this quadrant.
    pub fn index(self) -> usize {
        self as usize
    }

    /// A `path` step into this quadrant.
    pub fn step(self) -> Step {
        Step::Descend(self.index())
    }
}

impl TryFrom<usize> for Quadrant {
    type Error = TreeError;

    fn try_from(k: usize) -> Result<Self, TreeError> {
        Self::ALL
            .get(k)
            .copied()
            .ok_or(TreeError::ChildOutOfRange {
                child: k,
                stride: Stride::QUAD.get(),
            })
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.index())
    }
}

/// A [`Tree`] with four children per node.
#[derive(Debug)]
pub struct QuadTree<T> {
    tree: Tree<T>,
    traversal: Traversal,
}

impl<T> QuadTree<T> {
    /// Create an empty quad tree that walks recursively.
    pub fn new() -> Self {
        Self::with_traversal(Traversal::Recursive)
    }

    /// Create an empty quad tree with an explicit traversal mode.
    pub fn with_traversal(traversal: Traversal) -> Self {
        Self {
            tree: Tree::from_stride(Stride::QUAD, ArenaConfig::DEFAULT_INITIAL_RINGS),
            traversal,
        }
    }

    /// Create a quad tree from a config whose stride must be 4.
    pub fn from_config(config: &ArenaConfig, traversal: Traversal) -> Result<Self, TreeError> {
        let tree = Tree::new(config)?;
        if tree.stride() != Stride::QUAD {
            return Err(TreeError::StrideMismatch {
                expected: Stride::QUAD.get(),
                found: tree.stride().get(),
            });
        }
        Ok(Self { tree, traversal })
    }

    /// The traversal mode used by `each` and `path`.
    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Change the traversal mode.
    pub fn set_traversal(&mut self, traversal: Traversal) {
        self.traversal = traversal;
    }

    /// Pre-order walk in the configured traversal mode.
    pub fn each<F>(&self, visitor: F) -> Flow
    where
        F: FnMut(Visit<'_, T>) -> Flow,
    {
        self.tree.each_with(self.traversal, visitor)
    }

    /// Directed descent in the configured traversal mode.
    ///
    /// Under [`Traversal::RootOnly`] the descent ends at the root whatever
    /// the visitor returns.
    pub fn path<F>(&self, mut visitor: F) -> Cursor
    where
        F: FnMut(Visit<'_, T>) -> Step,
    {
        match self.traversal {
            Traversal::Recursive => self.tree.path(visitor),
            Traversal::RootOnly => self.tree.path(|visit| {
                visitor(visit);
                Step::Stop
            }),
        }
    }

    /// Lazy pre-order iterator over all quadrants.
    pub fn iter(&self) -> PreOrder<'_, T> {
        self.tree.iter()
    }

    /// The underlying generic tree.
    pub fn into_inner(self) -> Tree<T> {
        self.tree
    }
}

impl<T> Default for QuadTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for QuadTree<T> {
    type Target = Tree<T>;

    fn deref(&self) -> &Tree<T> {
        &self.tree
    }
}

impl<T> DerefMut for QuadTree<T> {
    fn deref_mut(&mut self) -> &mut Tree<T> {
        &mut self.tree
    }
}

/// Quadrant navigation for quad trees.
impl Cursor {
    /// Cursor at quadrant `q`, or empty.
    pub fn quadrant<T>(&self, tree: &QuadTree<T>, q: Quadrant) -> Cursor {
        self.child(tree, q.index())
    }

    /// Create quadrant `q` holding `value`.
    pub fn insert_quadrant<T>(
        &self,
        tree: &mut QuadTree<T>,
        q: Quadrant,
        value: T,
    ) -> Result<Cursor, TreeError> {
        self.insert_child(tree, q.index(), value)
    }

    /// Whether quadrant `q` is set.
    pub fn has_quadrant<T>(&self, tree: &QuadTree<T>, q: Quadrant) -> bool {
        self.has_child(tree, q.index())
    }
}
