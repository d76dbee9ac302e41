//! Level-order coordinate arithmetic.
//!
//! Every function here is pure. A slot is addressed either by its flat
//! index into the arena or by its [`Position`] `(ring, branch)`:
//!
//! ```text
//! index(ring, branch) = (stride^ring - 1) / (stride - 1) + branch
//! ```
//!
//! The subtree rooted at `(ring, branch)` covers, at every deeper ring `i`,
//! the contiguous span of `stride^(i - ring)` slots starting at
//! `index(i, branch * stride^(i - ring))`. [`Stride::subtree_spans`] walks
//! those spans so a whole subtree can be cleared without recursion.

use std::fmt;
use std::ops::Range;

use crate::error::CoordError;

/// Number of children per node. Always at least 2.
///
/// # Examples
///
/// ```
/// use ringtree_core::Stride;
///
/// let quad = Stride::new(4).unwrap();
/// assert_eq!(quad.tree_size(3).unwrap(), 1 + 4 + 16);
/// assert_eq!(quad.index(2, 5).unwrap(), 10);
/// assert!(Stride::new(1).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stride(u32);

impl Stride {
    /// Two children per node.
    pub const BINARY: Stride = Stride(2);

    /// Four children per node.
    pub const QUAD: Stride = Stride(4);

    /// Validate a stride.
    ///
    /// Returns `Err(CoordError::InvalidStride)` for 0 and 1, which have no
    /// well-defined level-order layout.
    pub fn new(stride: u32) -> Result<Self, CoordError> {
        if stride < 2 {
            return Err(CoordError::InvalidStride { stride });
        }
        Ok(Self(stride))
    }

    /// The raw child count.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Children per node as a `usize`, for slot arithmetic.
    pub fn width(self) -> usize {
        self.0 as usize
    }

    /// Number of slots in `ring`: `stride^ring`.
    pub fn ring_length(self, ring: u32) -> Result<usize, CoordError> {
        self.width().checked_pow(ring).ok_or(CoordError::Overflow {
            rings: ring,
            stride: self.0,
        })
    }

    /// Total slot count of a tree with `rings` rings: `Σ_{i<rings} stride^i`.
    pub fn tree_size(self, rings: u32) -> Result<usize, CoordError> {
        let overflow = CoordError::Overflow {
            rings,
            stride: self.0,
        };
        let mut size = 0usize;
        for ring in 0..rings {
            let len = self.ring_length(ring).map_err(|_| overflow.clone())?;
            size = size.checked_add(len).ok_or_else(|| overflow.clone())?;
        }
        Ok(size)
    }

    /// Flat index of `(ring, branch)`.
    ///
    /// Returns `Err(CoordError::BranchOutOfRange)` if `branch` does not fit
    /// in `ring`.
    pub fn index(self, ring: u32, branch: usize) -> Result<usize, CoordError> {
        let ring_length = self.ring_length(ring)?;
        if branch >= ring_length {
            return Err(CoordError::BranchOutOfRange {
                ring,
                branch,
                ring_length,
            });
        }
        // tree_size(ring) fits whenever ring_length(ring) does: it is
        // (stride^ring - 1) / (stride - 1) < stride^ring.
        let start = self.tree_size(ring)?;
        start.checked_add(branch).ok_or(CoordError::Overflow {
            rings: ring,
            stride: self.0,
        })
    }

    /// Decode a flat index into its `(ring, branch)` position.
    pub fn position_of(self, index: usize) -> Position {
        let mut ring = 0u32;
        let mut start = 0usize;
        let mut len = 1usize;
        loop {
            match start.checked_add(len) {
                Some(end) if index >= end => {
                    start = end;
                    len = len.saturating_mul(self.width());
                    ring += 1;
                }
                _ => {
                    return Position {
                        ring,
                        branch: index - start,
                    }
                }
            }
        }
    }

    /// Ring (depth) containing the slot at `index`.
    pub fn ring_of(self, index: usize) -> u32 {
        self.position_of(index).ring
    }

    /// Offset of the slot at `index` within its ring.
    pub fn branch_of(self, index: usize) -> usize {
        self.position_of(index).branch
    }

    /// Position of child `k` of `parent`: `(ring + 1, branch * stride + k)`.
    ///
    /// Returns `None` if `k >= stride` or the child would overflow.
    pub fn child_of(self, parent: Position, k: usize) -> Option<Position> {
        if k >= self.width() {
            return None;
        }
        let branch = parent
            .branch
            .checked_mul(self.width())?
            .checked_add(k)?;
        Some(Position {
            ring: parent.ring.checked_add(1)?,
            branch,
        })
    }

    /// Contiguous index spans covered by the subtree rooted at `index`, one
    /// per ring from the root's own ring up to (excluding) `rings`.
    pub fn subtree_spans(self, index: usize, rings: u32) -> SubtreeSpans {
        let root = self.position_of(index);
        SubtreeSpans {
            stride: self,
            root_ring: root.ring,
            ring: root.ring,
            branch: root.branch,
            rings,
        }
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Stride {
    type Error = CoordError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

/// Level-order coordinates of one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Depth, root = 0.
    pub ring: u32,
    /// 0-based offset within the ring.
    pub branch: usize,
}

impl Position {
    /// The root position `(0, 0)`.
    pub const ROOT: Position = Position { ring: 0, branch: 0 };

    /// Create a position.
    pub fn new(ring: u32, branch: usize) -> Self {
        Self { ring, branch }
    }

    /// Flat index of this position at the given stride.
    pub fn to_index(self, stride: Stride) -> Result<usize, CoordError> {
        stride.index(self.ring, self.branch)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.ring, self.branch)
    }
}

/// Iterator over the per-ring index spans of a subtree.
///
/// Produced by [`Stride::subtree_spans`]. Stops early if a span would
/// overflow `usize`; such a span could never be backed by storage anyway.
#[derive(Clone, Debug)]
pub struct SubtreeSpans {
    stride: Stride,
    root_ring: u32,
    ring: u32,
    branch: usize,
    rings: u32,
}

impl Iterator for SubtreeSpans {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.ring >= self.rings {
            return None;
        }
        let span = self
            .stride
            .ring_length(self.ring - self.root_ring)
            .ok()
            .and_then(|len| {
                let start = self.stride.index(self.ring, self.branch).ok()?;
                Some(start..start.checked_add(len)?)
            });
        match span {
            Some(span) => {
                self.ring += 1;
                self.branch = self.branch.saturating_mul(self.stride.width());
                Some(span)
            }
            None => {
                self.ring = self.rings;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for SubtreeSpans {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn stride_rejects_degenerate_values() {
        assert_eq!(Stride::new(0), Err(CoordError::InvalidStride { stride: 0 }));
        assert_eq!(Stride::new(1), Err(CoordError::InvalidStride { stride: 1 }));
        assert_eq!(Stride::new(2), Ok(Stride::BINARY));
        assert_eq!(Stride::try_from(4), Ok(Stride::QUAD));
    }

    #[test]
    fn ring_lengths_are_powers() {
        assert_eq!(Stride::BINARY.ring_length(0).unwrap(), 1);
        assert_eq!(Stride::BINARY.ring_length(3).unwrap(), 8);
        assert_eq!(Stride::QUAD.ring_length(2).unwrap(), 16);
    }

    #[test]
    fn tree_size_sums_rings() {
        assert_eq!(Stride::BINARY.tree_size(0).unwrap(), 0);
        assert_eq!(Stride::BINARY.tree_size(1).unwrap(), 1);
        assert_eq!(Stride::BINARY.tree_size(3).unwrap(), 7);
        assert_eq!(Stride::QUAD.tree_size(3).unwrap(), 21);
        assert_eq!(Stride::new(3).unwrap().tree_size(4).unwrap(), 40);
    }

    #[test]
    fn tree_size_overflow_is_reported() {
        let err = Stride::BINARY.tree_size(200).unwrap_err();
        assert_eq!(
            err,
            CoordError::Overflow {
                rings: 200,
                stride: 2
            }
        );
    }

    #[test]
    fn binary_indices_match_heap_layout() {
        assert_eq!(Stride::BINARY.index(0, 0).unwrap(), 0);
        assert_eq!(Stride::BINARY.index(1, 0).unwrap(), 1);
        assert_eq!(Stride::BINARY.index(1, 1).unwrap(), 2);
        assert_eq!(Stride::BINARY.index(2, 3).unwrap(), 6);
        assert_eq!(Stride::BINARY.index(3, 7).unwrap(), 14);
    }

    #[test]
    fn index_rejects_branch_outside_ring() {
        let err = Stride::BINARY.index(1, 2).unwrap_err();
        assert_eq!(
            err,
            CoordError::BranchOutOfRange {
                ring: 1,
                branch: 2,
                ring_length: 2
            }
        );
    }

    #[test]
    fn position_of_decodes_ring_boundaries() {
        let s = Stride::QUAD;
        assert_eq!(s.position_of(0), Position::ROOT);
        assert_eq!(s.position_of(1), Position::new(1, 0));
        assert_eq!(s.position_of(4), Position::new(1, 3));
        assert_eq!(s.position_of(5), Position::new(2, 0));
        assert_eq!(s.position_of(20), Position::new(2, 15));
        assert_eq!(s.position_of(21), Position::new(3, 0));
    }

    #[test]
    fn position_of_huge_index_terminates() {
        let p = Stride::BINARY.position_of(usize::MAX);
        assert!(p.ring > 0);
    }

    #[test]
    fn child_of_follows_stride() {
        let parent = Position::new(1, 1);
        assert_eq!(Stride::BINARY.child_of(parent, 0), Some(Position::new(2, 2)));
        assert_eq!(Stride::BINARY.child_of(parent, 1), Some(Position::new(2, 3)));
        assert_eq!(Stride::BINARY.child_of(parent, 2), None);
        assert_eq!(Stride::QUAD.child_of(parent, 3), Some(Position::new(2, 7)));
    }

    #[test]
    fn subtree_spans_of_binary_left_child() {
        // (1, 1) at index 2: itself, then 5..7, then 11..15.
        let spans: Vec<_> = Stride::BINARY.subtree_spans(2, 4).collect();
        assert_eq!(spans, vec![2..3, 5..7, 11..15]);
    }

    #[test]
    fn subtree_spans_of_root_cover_everything() {
        let spans: Vec<_> = Stride::QUAD.subtree_spans(0, 3).collect();
        assert_eq!(spans, vec![0..1, 1..5, 5..21]);
    }

    #[test]
    fn subtree_spans_past_ring_count_are_empty() {
        assert_eq!(Stride::BINARY.subtree_spans(7, 3).count(), 0);
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(2, 5).to_string(), "(2, 5)");
    }

    proptest! {
        #[test]
        fn index_round_trips(stride in 2u32..9, ring in 0u32..8, seed in any::<usize>()) {
            let s = Stride::new(stride).unwrap();
            let branch = seed % s.ring_length(ring).unwrap();
            let index = s.index(ring, branch).unwrap();
            prop_assert_eq!(s.ring_of(index), ring);
            prop_assert_eq!(s.branch_of(index), branch);
        }

        #[test]
        fn closed_form_matches_sum(stride in 2u32..9, ring in 0u32..8) {
            let s = Stride::new(stride).unwrap();
            let n = s.ring_length(ring).unwrap();
            prop_assert_eq!(s.index(ring, 0).unwrap(), (n - 1) / (s.width() - 1));
        }

        #[test]
        fn subtree_spans_are_exactly_the_descendants(
            stride in 2u32..5,
            index in 0usize..40,
            rings in 1u32..6,
        ) {
            let s = Stride::new(stride).unwrap();
            let size = s.tree_size(rings).unwrap();
            prop_assume!(index < size);

            let mut covered = vec![false; size];
            for span in s.subtree_spans(index, rings) {
                for i in span {
                    covered[i] = true;
                }
            }

            // A slot is a descendant iff walking parents reaches `index`.
            for (slot, &hit) in covered.iter().enumerate() {
                let mut p = slot;
                let mut descends = p == index;
                while p > index && !descends {
                    let pos = s.position_of(p);
                    p = s.index(pos.ring - 1, pos.branch / s.width()).unwrap();
                    descends = p == index;
                }
                prop_assert_eq!(hit, descends, "slot {}", slot);
            }
        }
    }
}
