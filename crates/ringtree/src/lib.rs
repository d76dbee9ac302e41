//! Ringtree: implicit-array trees with a fixed branching factor.
//!
//! Every node of a tree lives in one flat, growable arena and is addressed
//! by its level-order coordinates `(ring, branch)` rather than by pointer.
//! Ring `r` holds `stride^r` slots, and the node at `(ring, branch)` sits at
//! flat index `(stride^ring - 1) / (stride - 1) + branch`. Child `k` of that
//! node lives at `(ring + 1, branch * stride + k)`, so a whole subtree maps
//! onto one contiguous span per ring and can be removed without recursion.
//!
//! Nodes are reached through [`Cursor`]s: copyable views holding a stable
//! [`Reference`] that survives arena growth. A tree is positional, not
//! ordered: nodes sit wherever the caller inserts them.
//!
//! # Quick start
//!
//! ```rust
//! use ringtree::prelude::*;
//!
//! let mut tree = BinaryTree::new();
//! let root = tree.set_root(2).unwrap();
//! let left = root.insert_left(&mut tree, 8).unwrap();
//! root.insert_right(&mut tree, 7).unwrap();
//!
//! assert_eq!(left.position(&tree), Some(Position::new(1, 1)));
//! assert_eq!(tree.search(&7).parent(&tree), root);
//!
//! let payloads: Vec<i32> = tree.iter().map(|visit| *visit.payload).collect();
//! assert_eq!(payloads, [2, 8, 7]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`coord`] | `ringtree-core` | Strides, positions, index arithmetic |
//! | [`arena`] | `ringtree-arena` | Growable level-order storage and references |
//! | [`binary`] | this crate | Stride 2 trees with named children |
//! | [`quad`] | this crate | Stride 4 trees addressed by quadrant |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binary;
mod cursor;
mod error;
mod node;
pub mod quad;
mod tree;
mod visit;

/// Coordinate arithmetic and identities (`ringtree-core`).
pub use ringtree_core as coord;

/// Level-order storage and stable references (`ringtree-arena`).
///
/// Trees manage their own arena; this module is only needed to inspect
/// storage directly or to reuse the arena for other slot types.
pub use ringtree_arena as arena;

pub use binary::BinaryTree;
pub use cursor::Cursor;
pub use error::TreeError;
pub use node::Node;
pub use quad::{QuadTree, Quadrant};
pub use ringtree_arena::{ArenaConfig, ArenaError, Reference};
pub use ringtree_core::{CoordError, Position, Stride};
pub use tree::{PreOrder, Tree};
pub use visit::{Flow, Step, Traversal, Visit};

/// Common imports for typical usage.
///
/// ```rust
/// use ringtree::prelude::*;
/// ```
pub mod prelude {
    // Containers
    pub use crate::{BinaryTree, QuadTree, Quadrant, Tree};

    // Navigation
    pub use crate::{Cursor, Position};

    // Traversal
    pub use crate::{Flow, Step, Traversal, Visit};

    // Configuration and errors
    pub use crate::{ArenaConfig, TreeError};
}
