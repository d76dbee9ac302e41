//! The generic fixed-stride tree container.

use smallvec::SmallVec;

use ringtree_arena::{Arena, ArenaConfig};
use ringtree_core::{ArenaId, CoordError, Position, Stride};

use crate::cursor::Cursor;
use crate::error::TreeError;
use crate::node::Node;
use crate::visit::{Flow, Step, Traversal, Visit};

/// Child visiting order, one entry per child slot.
pub(crate) type ChildOrder = SmallVec<[usize; 4]>;

/// A positional tree whose nodes live in one level-order [`Arena`].
///
/// The stride is fixed at construction; the ring count starts at the
/// configured `initial_rings` and grows as deeper children are inserted.
/// This is not a search tree: nodes sit wherever the caller puts them.
///
/// Every walk (`each`, `each_with`, `iter`) visits children in the tree's
/// child order: ascending slots, unless a specialization such as
/// [`BinaryTree`](crate::BinaryTree) fixes another one.
///
/// # Examples
///
/// ```
/// use ringtree::{ArenaConfig, Flow, Tree};
///
/// let mut tree = Tree::new(&ArenaConfig::new(3)).unwrap();
/// let root = tree.set_root("root").unwrap();
/// let middle = root.insert_child(&mut tree, 1, "middle").unwrap();
/// middle.insert_child(&mut tree, 2, "leaf").unwrap();
///
/// let mut seen = Vec::new();
/// tree.each(|visit| {
///     seen.push(*visit.payload);
///     Flow::Continue
/// });
/// assert_eq!(seen, ["root", "middle", "leaf"]);
/// assert!(!tree.search(&"leaf").is_empty());
/// ```
#[derive(Debug)]
pub struct Tree<T> {
    arena: Arena<Node<T>>,
    order: ChildOrder,
}

impl<T> Tree<T> {
    /// Create an empty tree from a validated config.
    pub fn new(config: &ArenaConfig) -> Result<Self, TreeError> {
        let arena = Arena::new(config)?;
        let order = ascending(arena.stride());
        Ok(Self { arena, order })
    }

    /// Create an empty tree with the given stride and default ring count.
    pub fn with_stride(stride: u32) -> Result<Self, TreeError> {
        Self::new(&ArenaConfig::new(stride))
    }

    pub(crate) fn from_stride(stride: Stride, initial_rings: u32) -> Self {
        Self {
            arena: Arena::with_stride(stride, initial_rings),
            order: ascending(stride),
        }
    }

    /// Replace the child visiting order. `order` must be a permutation of
    /// the child slots.
    pub(crate) fn with_order(mut self, order: &[usize]) -> Self {
        debug_assert_eq!(order.len(), self.stride().width());
        self.order = ChildOrder::from_slice(order);
        self
    }

    /// Children per node.
    pub fn stride(&self) -> Stride {
        self.arena.stride()
    }

    /// Allocated slot count.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Ring count of the backing arena.
    pub fn rings(&self) -> u32 {
        self.arena.rings()
    }

    /// Identity of the backing arena, recorded in every node and cursor.
    pub fn id(&self) -> ArenaId {
        self.arena.id()
    }

    /// The backing arena.
    pub fn arena(&self) -> &Arena<Node<T>> {
        &self.arena
    }

    /// Reset the tree to hold only a root with `value`.
    ///
    /// Every previous node is destroyed (capacity is kept) and every
    /// previously issued cursor goes stale.
    pub fn set_root(&mut self, value: T) -> Result<Cursor, TreeError> {
        self.arena.zero();
        let reference = self.arena.reference(0);
        let (id, stride) = (self.id(), self.stride());
        let node = Node::new(id, Position::ROOT, stride, None, value);
        *reference.get_mut(&mut self.arena)? = node;
        tracing::debug!(tree = %self.id(), capacity = self.capacity(), "root set");
        Ok(Cursor::at(reference))
    }

    /// Cursor at the root, or empty if there is none.
    pub fn root(&self) -> Cursor {
        let cursor = Cursor::at(self.arena.reference(0));
        if cursor.exists(self) {
            cursor
        } else {
            Cursor::empty()
        }
    }

    /// The empty cursor, for comparisons.
    pub fn end(&self) -> Cursor {
        Cursor::empty()
    }

    /// The present node a cursor points at, without growing storage.
    pub fn node(&self, cursor: Cursor) -> Option<&Node<T>> {
        let reference = cursor.reference()?;
        reference
            .get(&self.arena)
            .ok()
            .flatten()
            .filter(|node| !node.is_empty())
    }

    pub(crate) fn node_mut(&mut self, cursor: Cursor) -> Option<&mut Node<T>> {
        let index = self.arena.check(&cursor.reference()?).ok()?;
        self.arena.get_mut(index).filter(|node| !node.is_empty())
    }

    pub(crate) fn insert_child(
        &mut self,
        parent: Cursor,
        k: usize,
        value: T,
    ) -> Result<Cursor, TreeError> {
        let parent_ref = parent.reference().ok_or(TreeError::EmptyCursor)?;
        self.arena.check(&parent_ref)?;

        let stride = self.stride();
        if k >= stride.width() {
            return Err(TreeError::ChildOutOfRange {
                child: k,
                stride: stride.get(),
            });
        }
        let parent_pos = self
            .node(parent)
            .and_then(|node| node.position())
            .ok_or(TreeError::EmptyCursor)?;
        let position = stride.child_of(parent_pos, k).ok_or(CoordError::Overflow {
            rings: parent_pos.ring.saturating_add(2),
            stride: stride.get(),
        })?;
        let index = position.to_index(stride)?;

        // An occupied slot is replaced together with its whole subtree.
        if self.arena.get(index).is_some_and(|node| !node.is_empty()) {
            let cleared = self.arena.remove(index);
            tracing::trace!(tree = %self.id(), index, cleared, "subtree replaced");
        }

        let child_ref = self.arena.reference(index);
        let node = Node::new(self.id(), position, stride, Some(parent_ref), value);
        *child_ref.get_mut(&mut self.arena)? = node;

        // The parent's slot index is stable across the growth above.
        if let Some(parent_node) = self.arena.get_mut(parent_ref.index()) {
            parent_node.children[k] = Some(child_ref);
        }
        Ok(Cursor::at(child_ref))
    }

    pub(crate) fn remove(&mut self, cursor: Cursor) -> Cursor {
        let (reference, node) = match (cursor.reference(), self.node(cursor)) {
            (Some(reference), Some(node)) => (reference, node),
            _ => return Cursor::empty(),
        };
        let parent = node.parent();
        let index = node.index(self.stride()).unwrap_or(reference.index());

        if let Some(parent_node) = parent.and_then(|p| self.arena.get_mut(p.index())) {
            for link in parent_node.children.iter_mut() {
                if *link == Some(reference) {
                    *link = None;
                }
            }
        }
        let cleared = self.arena.remove(index);
        tracing::trace!(tree = %self.id(), index, cleared, "node removed");
        parent.map(Cursor::at).unwrap_or_default()
    }

    /// First node, in flat-index order, whose payload equals `value`.
    ///
    /// A linear scan over every allocated slot; the tree keeps no ordering.
    pub fn search(&self, value: &T) -> Cursor
    where
        T: PartialEq,
    {
        self.arena
            .iter()
            .find(|(_, node)| !node.is_empty() && node.payload() == Some(value))
            .map(|(index, _)| Cursor::at(self.arena.reference(index)))
            .unwrap_or_default()
    }

    /// Pre-order walk from the root, children in the tree's child order.
    ///
    /// Returning [`Flow::Stop`] from the visitor ends the whole walk; the
    /// result tells whether that happened.
    pub fn each<F>(&self, visitor: F) -> Flow
    where
        F: FnMut(Visit<'_, T>) -> Flow,
    {
        self.each_with(Traversal::Recursive, visitor)
    }

    /// Like [`Tree::each`], with an explicit [`Traversal`] mode.
    pub fn each_with<F>(&self, traversal: Traversal, mut visitor: F) -> Flow
    where
        F: FnMut(Visit<'_, T>) -> Flow,
    {
        let root = self.root();
        match traversal {
            Traversal::Recursive => self.walk(root, &self.order, &mut visitor),
            Traversal::RootOnly => match self.visit(root) {
                Some(visit) => visitor(visit),
                None => Flow::Continue,
            },
        }
    }

    fn walk<F>(&self, at: Cursor, order: &[usize], visitor: &mut F) -> Flow
    where
        F: FnMut(Visit<'_, T>) -> Flow,
    {
        let Some(visit) = self.visit(at) else {
            return Flow::Continue;
        };
        if visitor(visit).is_stop() {
            return Flow::Stop;
        }
        for &k in order {
            if self.walk(at.child(self, k), order, visitor).is_stop() {
                return Flow::Stop;
            }
        }
        Flow::Continue
    }

    fn visit(&self, at: Cursor) -> Option<Visit<'_, T>> {
        let node = self.node(at)?;
        Some(Visit {
            cursor: at,
            position: node.position()?,
            payload: node.payload()?,
        })
    }

    /// Directed descent from the root along the children the visitor picks.
    ///
    /// Stops when the visitor returns [`Step::Stop`] or names a child that
    /// does not exist. Returns a cursor at the last visited node (empty if
    /// the tree has no root).
    pub fn path<F>(&self, mut visitor: F) -> Cursor
    where
        F: FnMut(Visit<'_, T>) -> Step,
    {
        let mut at = self.root();
        let mut last = Cursor::empty();
        while let Some(visit) = self.visit(at) {
            last = at;
            match visitor(visit) {
                Step::Stop => break,
                Step::Descend(k) => at = at.child(self, k),
            }
        }
        last
    }

    /// Lazy pre-order iterator, children in the tree's child order.
    pub fn iter(&self) -> PreOrder<'_, T> {
        PreOrder::new(self, self.order.clone())
    }

    /// Present nodes in flat-index order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> + '_ {
        self.arena
            .iter()
            .map(|(_, node)| node)
            .filter(|node| !node.is_empty())
    }

    /// Number of present nodes. Scans the arena.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    /// Whether the tree holds no node.
    pub fn is_empty(&self) -> bool {
        self.nodes().next().is_none()
    }

    /// Release all storage.
    pub fn clear(&mut self) {
        self.arena.clear();
    }
}

fn ascending(stride: Stride) -> ChildOrder {
    (0..stride.width()).collect()
}

/// Pre-order iterator over a tree, yielding one [`Visit`] per node.
///
/// Finite and restartable: it borrows the tree immutably, so calling
/// `iter()` again starts over from the root. Dropping it early is the
/// equivalent of returning [`Flow::Stop`] from an `each` visitor.
pub struct PreOrder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<Cursor>,
    order: ChildOrder,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, order: ChildOrder) -> Self {
        let root = tree.root();
        let stack = if root.is_empty() { Vec::new() } else { vec![root] };
        Self { tree, stack, order }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = Visit<'a, T>;

    fn next(&mut self) -> Option<Visit<'a, T>> {
        while let Some(at) = self.stack.pop() {
            let Some(visit) = self.tree.visit(at) else {
                continue;
            };
            for &k in self.order.iter().rev() {
                let child = at.child(self.tree, k);
                if !child.is_empty() {
                    self.stack.push(child);
                }
            }
            return Some(visit);
        }
        None
    }
}

impl<T> std::iter::FusedIterator for PreOrder<'_, T> {}
