//! Copyable views for navigating and mutating a tree.

use ringtree_arena::Reference;
use ringtree_core::Position;

use crate::error::TreeError;
use crate::tree::Tree;

/// A movable view over one tree slot.
///
/// A cursor is just a [`Reference`]; it borrows nothing. Every operation
/// takes the tree explicitly and resolves the reference afresh, so cursors
/// stay usable across arena growth and any number of them may point at the
/// same node. They all observe the same payload, because there is only one.
///
/// Navigation through an empty cursor, or one whose node was removed or
/// reset, yields another empty cursor. Only insertion reports failure.
///
/// Equality compares the underlying references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    reference: Option<Reference>,
}

impl Cursor {
    /// A cursor that holds no node.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn at(reference: Reference) -> Self {
        Self {
            reference: Some(reference),
        }
    }

    /// The held reference.
    pub fn reference(&self) -> Option<Reference> {
        self.reference
    }

    /// Whether the cursor holds no reference at all.
    pub fn is_empty(&self) -> bool {
        self.reference.is_none()
    }

    /// Whether the cursor resolves to a present node of `tree`.
    pub fn exists<T>(&self, tree: &Tree<T>) -> bool {
        tree.node(*self).is_some()
    }

    /// Cursor at child slot `k`, or empty if there is no such child.
    pub fn child<T>(&self, tree: &Tree<T>, k: usize) -> Cursor {
        tree.node(*self)
            .and_then(|node| node.child(k))
            .map(Cursor::at)
            .unwrap_or_default()
    }

    /// Create child `k` holding `value` and return a cursor at it.
    ///
    /// The child lands at `(ring + 1, branch * stride + k)`; storage grows
    /// if that ring is not allocated yet. A node already in that slot is
    /// replaced, and its whole subtree is removed first.
    pub fn insert_child<T>(
        &self,
        tree: &mut Tree<T>,
        k: usize,
        value: T,
    ) -> Result<Cursor, TreeError> {
        tree.insert_child(*self, k, value)
    }

    /// Cursor at the parent, or empty at the root.
    pub fn parent<T>(&self, tree: &Tree<T>) -> Cursor {
        tree.node(*self)
            .and_then(|node| node.parent())
            .map(Cursor::at)
            .unwrap_or_default()
    }

    /// Remove this node and its whole subtree; returns a cursor at the
    /// parent (empty if this was the root or held nothing).
    pub fn remove<T>(&self, tree: &mut Tree<T>) -> Cursor {
        tree.remove(*self)
    }

    /// Whether the node exists and has no parent.
    pub fn is_root<T>(&self, tree: &Tree<T>) -> bool {
        tree.node(*self).is_some_and(|node| node.parent().is_none())
    }

    /// Whether the node exists and has no children.
    pub fn is_leaf<T>(&self, tree: &Tree<T>) -> bool {
        tree.node(*self).is_some_and(|node| node.is_leaf())
    }

    /// Whether child slot `k` is set.
    pub fn has_child<T>(&self, tree: &Tree<T>, k: usize) -> bool {
        tree.node(*self).is_some_and(|node| node.child(k).is_some())
    }

    /// Coordinates of the node.
    pub fn position<T>(&self, tree: &Tree<T>) -> Option<Position> {
        tree.node(*self).and_then(|node| node.position())
    }

    /// The node's payload.
    pub fn get<'a, T>(&self, tree: &'a Tree<T>) -> Option<&'a T> {
        tree.node(*self).and_then(|node| node.payload())
    }

    /// Mutable access to the node's payload.
    pub fn get_mut<'a, T>(&self, tree: &'a mut Tree<T>) -> Option<&'a mut T> {
        tree.node_mut(*self).and_then(|node| node.payload.as_mut())
    }

    /// Move this cursor to child slot `k` in place.
    pub fn step_child<T>(&mut self, tree: &Tree<T>, k: usize) -> &mut Self {
        if !self.is_empty() {
            *self = self.child(tree, k);
        }
        self
    }
}
