//! Tree nodes as stored in the arena.

use smallvec::{smallvec, SmallVec};

use ringtree_arena::Reference;
use ringtree_core::{ArenaId, Position, Stride};

/// One arena slot of a tree.
///
/// A node is *absent* when it has no owning tree or no coordinates; that is
/// the state of every slot that was never written, was removed, or was
/// reset by `set_root`. Absence is tracked separately from the payload, so a
/// node holding `0`, `""` or any other default-like value is still present.
///
/// Child and parent links are [`Reference`]s (logical indices), never
/// ownership edges: the arena owns every node.
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub(crate) tree: Option<ArenaId>,
    pub(crate) position: Option<Position>,
    pub(crate) children: SmallVec<[Option<Reference>; 4]>,
    pub(crate) parent: Option<Reference>,
    pub(crate) payload: Option<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            tree: None,
            position: None,
            children: SmallVec::new(),
            parent: None,
            payload: None,
        }
    }
}

impl<T> Node<T> {
    pub(crate) fn new(
        tree: ArenaId,
        position: Position,
        stride: Stride,
        parent: Option<Reference>,
        payload: T,
    ) -> Self {
        Self {
            tree: Some(tree),
            position: Some(position),
            children: smallvec![None; stride.width()],
            parent,
            payload: Some(payload),
        }
    }

    /// Whether this slot holds no node.
    pub fn is_empty(&self) -> bool {
        self.tree.is_none() || self.position.is_none()
    }

    /// Identity of the owning tree's arena.
    pub fn tree(&self) -> Option<ArenaId> {
        self.tree
    }

    /// `(ring, branch)` coordinates, `None` when absent.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Flat index recomputed from the node's own coordinates.
    pub fn index(&self, stride: Stride) -> Option<usize> {
        self.position?.to_index(stride).ok()
    }

    /// The stored value, `None` when absent.
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Link to child slot `k`, if that child exists.
    pub fn child(&self, k: usize) -> Option<Reference> {
        self.children.get(k).copied().flatten()
    }

    /// Present children with their slot numbers, in slot order.
    pub fn children(&self) -> impl Iterator<Item = (usize, Reference)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(k, c)| c.map(|r| (k, r)))
    }

    /// Link to the parent, `None` for the root.
    pub fn parent(&self) -> Option<Reference> {
        self.parent
    }

    /// Whether no child link is set.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}
