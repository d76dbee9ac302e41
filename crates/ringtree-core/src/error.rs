//! Error types for coordinate arithmetic.

use std::error::Error;
use std::fmt;

/// Errors arising from stride validation or level-order index arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoordError {
    /// A stride of 0 or 1 was requested.
    ///
    /// Ring lengths are `stride^ring`; with stride 1 every ring has one slot
    /// and the closed-form index formula divides by zero.
    InvalidStride {
        /// The rejected stride.
        stride: u32,
    },
    /// A branch offset does not fit inside its ring.
    BranchOutOfRange {
        /// The ring that was addressed.
        ring: u32,
        /// The offending branch.
        branch: usize,
        /// Number of slots in that ring.
        ring_length: usize,
    },
    /// The slot count for the requested ring depth does not fit in `usize`.
    Overflow {
        /// Ring count (or ring depth) being computed.
        rings: u32,
        /// Stride in effect.
        stride: u32,
    },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStride { stride } => {
                write!(f, "invalid stride {stride}: a tree needs at least 2 children per node")
            }
            Self::BranchOutOfRange {
                ring,
                branch,
                ring_length,
            } => {
                write!(
                    f,
                    "branch {branch} out of range for ring {ring} ({ring_length} slots)"
                )
            }
            Self::Overflow { rings, stride } => {
                write!(f, "slot count overflow: {rings} rings at stride {stride}")
            }
        }
    }
}

impl Error for CoordError {}
