//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use ringtree_core::{ArenaId, CoordError};

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Coordinate arithmetic failed (invalid stride or slot-count overflow).
    Coord(CoordError),
    /// Growth would exceed the configured ring cap.
    CapacityExceeded {
        /// Ring count that was needed.
        requested_rings: u32,
        /// The configured maximum.
        max_rings: u32,
    },
    /// A [`Reference`](crate::Reference) minted by one arena was used with
    /// another.
    ForeignReference {
        /// Identity of the arena the operation ran on.
        expected: ArenaId,
        /// Identity recorded in the reference.
        found: ArenaId,
    },
    /// A reference minted before the arena was zeroed, cleared or
    /// restrided.
    StaleReference {
        /// Epoch recorded in the reference.
        reference_epoch: u32,
        /// Current arena epoch.
        arena_epoch: u32,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coord(e) => write!(f, "coordinate error: {e}"),
            Self::CapacityExceeded {
                requested_rings,
                max_rings,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested_rings} rings, max {max_rings}"
                )
            }
            Self::ForeignReference { expected, found } => {
                write!(f, "reference belongs to {found}, not {expected}")
            }
            Self::StaleReference {
                reference_epoch,
                arena_epoch,
            } => {
                write!(
                    f,
                    "stale reference: epoch {reference_epoch}, arena epoch {arena_epoch}"
                )
            }
        }
    }
}

impl Error for ArenaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Coord(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoordError> for ArenaError {
    fn from(e: CoordError) -> Self {
        Self::Coord(e)
    }
}
