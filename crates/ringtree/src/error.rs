//! Error types for tree mutation.

use std::error::Error;
use std::fmt;

use ringtree_arena::ArenaError;
use ringtree_core::CoordError;

/// Errors from operations that create nodes or trees.
///
/// Navigation never fails: a missing, removed or stale target yields an
/// empty [`Cursor`](crate::Cursor) instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// A child was inserted through a cursor that holds no node.
    EmptyCursor,
    /// The child slot does not exist at this stride.
    ChildOutOfRange {
        /// Requested child slot.
        child: usize,
        /// Children per node.
        stride: u32,
    },
    /// A specialized tree was built from a config with the wrong stride.
    StrideMismatch {
        /// Stride the tree kind requires.
        expected: u32,
        /// Stride the config asked for.
        found: u32,
    },
    /// The underlying arena rejected the operation.
    Arena(ArenaError),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCursor => write!(f, "cursor does not hold a node"),
            Self::ChildOutOfRange { child, stride } => {
                write!(f, "child {child} out of range for stride {stride}")
            }
            Self::StrideMismatch { expected, found } => {
                write!(f, "stride mismatch: expected {expected}, found {found}")
            }
            Self::Arena(e) => write!(f, "arena error: {e}"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for TreeError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<CoordError> for TreeError {
    fn from(e: CoordError) -> Self {
        Self::Arena(ArenaError::Coord(e))
    }
}
