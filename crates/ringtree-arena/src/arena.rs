//! The growable level-order arena.

use ringtree_core::{ArenaId, CoordError, Stride};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::Reference;

/// What [`Arena::ensure`] did to the storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ensure {
    /// Storage already covered the request.
    Unchanged,
    /// Storage grew; every slot below `previous` kept its contents.
    Grown {
        /// Capacity before growth.
        previous: usize,
        /// Capacity after growth.
        capacity: usize,
    },
    /// The stride changed: all previous contents were discarded and fresh
    /// storage was allocated at the new stride.
    Restrided {
        /// Capacity of the fresh storage.
        capacity: usize,
    },
}

/// Contiguous, ring-ordered storage for one tree.
///
/// Slots hold `T::default()` until written; that value is the "absent"
/// state. Capacity is always `stride.tree_size(rings)` once allocated and 0
/// before the first access or after [`Arena::clear`].
#[derive(Debug)]
pub struct Arena<T> {
    id: ArenaId,
    /// Bumped whenever existing slot contents are wiped wholesale.
    epoch: u32,
    slots: Vec<T>,
    rings: u32,
    stride: Stride,
    max_rings: Option<u32>,
}

impl<T> Arena<T> {
    /// Unique identity of this arena.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Current epoch.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Current stride.
    pub fn stride(&self) -> Stride {
        self.stride
    }

    /// Ring count the next allocation will cover (at least).
    pub fn rings(&self) -> u32 {
        self.rings
    }

    /// Total slot count of the current storage.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Mint a reference to `index` in the current epoch.
    ///
    /// The slot does not need to exist yet; resolving the reference with
    /// [`Reference::get_mut`] grows storage to cover it.
    pub fn reference(&self, index: usize) -> Reference {
        Reference::new(self.id, self.epoch, index)
    }

    /// Verify that `reference` was minted by this arena in this epoch.
    pub fn check(&self, reference: &Reference) -> Result<usize, ArenaError> {
        if reference.arena != self.id {
            return Err(ArenaError::ForeignReference {
                expected: self.id,
                found: reference.arena,
            });
        }
        if reference.epoch != self.epoch {
            return Err(ArenaError::StaleReference {
                reference_epoch: reference.epoch,
                arena_epoch: self.epoch,
            });
        }
        Ok(reference.index)
    }

    /// Shared access to a slot without growing. `None` beyond capacity.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Mutable access to a slot without growing. `None` beyond capacity.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Iterate over every allocated slot with its flat index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots.iter().enumerate()
    }

    /// Release all storage. Capacity becomes 0; the ring count is kept so
    /// the next access reallocates at the same depth.
    pub fn clear(&mut self) {
        tracing::debug!(arena = %self.id, capacity = self.slots.len(), "arena cleared");
        self.slots = Vec::new();
        self.bump_epoch();
    }

    fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}

impl<T: Default> Arena<T> {
    /// Create an empty arena. No storage is allocated until first access.
    pub fn new(config: &ArenaConfig) -> Result<Self, ArenaError> {
        let stride = config.validate()?;
        Ok(Self {
            max_rings: config.max_rings,
            ..Self::with_stride(stride, config.initial_rings)
        })
    }

    /// Create an empty, uncapped arena for an already validated stride.
    pub fn with_stride(stride: Stride, initial_rings: u32) -> Self {
        Self {
            id: ArenaId::next(),
            epoch: 0,
            slots: Vec::new(),
            rings: initial_rings,
            stride,
            max_rings: None,
        }
    }

    /// Make sure storage covers `rings` rings at `stride`.
    ///
    /// If `stride` differs from the current stride, every existing slot is
    /// discarded first (see [`Arena::restride`]); this is the documented
    /// way to repurpose an arena, not an error. Storage is (re)allocated
    /// when `rings` exceeds the current ring count or nothing is allocated
    /// yet; the new size covers `max(current rings, rings)` and the old
    /// slots are moved into the same flat indices.
    ///
    /// Growth past `max_rings` fails with [`ArenaError::CapacityExceeded`]
    /// before anything is discarded, restride included.
    pub fn ensure(&mut self, rings: u32, stride: Stride) -> Result<Ensure, ArenaError> {
        // Checked before any reset: a rejected request leaves the arena as is.
        let target = self.rings.max(rings);
        if let Some(max) = self.max_rings {
            if target > max {
                return Err(ArenaError::CapacityExceeded {
                    requested_rings: target,
                    max_rings: max,
                });
            }
        }

        let restrided = self.restride(stride);
        if rings <= self.rings && !self.slots.is_empty() {
            return Ok(Ensure::Unchanged);
        }

        let previous = self.slots.len();
        let capacity = self.grow(target)?;
        if restrided {
            Ok(Ensure::Restrided { capacity })
        } else if capacity == previous {
            Ok(Ensure::Unchanged)
        } else {
            Ok(Ensure::Grown { previous, capacity })
        }
    }

    /// Switch to `stride`, discarding all contents if it differs from the
    /// current one. Returns whether a reset happened.
    ///
    /// The flat layout of one stride means nothing under another, so no
    /// slot can be carried over. Storage is released; the ring count is
    /// kept and the epoch advances.
    pub fn restride(&mut self, stride: Stride) -> bool {
        if stride == self.stride {
            return false;
        }
        tracing::debug!(
            arena = %self.id,
            from = %self.stride,
            to = %stride,
            discarded = self.slots.len(),
            "arena restrided, contents discarded"
        );
        self.slots = Vec::new();
        self.stride = stride;
        self.bump_epoch();
        true
    }

    fn grow(&mut self, rings: u32) -> Result<usize, ArenaError> {
        let size = self.stride.tree_size(rings)?;
        let previous = self.slots.len();

        // Rings only ever append after the existing level-order prefix, so
        // the overlapping prefix keeps its indices.
        let keep = previous.min(size);
        let mut fresh = Vec::with_capacity(size);
        fresh.extend(self.slots.drain(..keep));
        fresh.resize_with(size, T::default);
        self.slots = fresh;
        self.rings = rings;

        tracing::debug!(
            arena = %self.id,
            previous,
            capacity = size,
            rings,
            "arena grown"
        );
        Ok(size)
    }

    /// Reset every slot to the absent state, keeping capacity.
    pub fn zero(&mut self) {
        tracing::debug!(arena = %self.id, capacity = self.slots.len(), "arena zeroed");
        self.slots.fill_with(T::default);
        self.bump_epoch();
    }

    /// Clear the slot at `index` and every slot of its subtree.
    ///
    /// Runs over one contiguous span per ring, no recursion. Spans are
    /// clipped to current capacity. Returns the number of slots reset.
    pub fn remove(&mut self, index: usize) -> usize {
        let capacity = self.slots.len();
        let mut cleared = 0;
        for span in self.stride.subtree_spans(index, self.rings) {
            if span.start >= capacity {
                break;
            }
            let end = span.end.min(capacity);
            self.slots[span.start..end].fill_with(T::default);
            cleared += end - span.start;
        }
        tracing::debug!(arena = %self.id, index, cleared, "subtree removed");
        cleared
    }

    /// Mutable access to a slot, growing storage to cover it.
    ///
    /// This is the indexing primitive of the arena: it computes the ring of
    /// `index` and calls `ensure(ring + 1, stride)`, so capacity can change
    /// even when the caller only reads the slot.
    pub fn resolve(&mut self, index: usize) -> Result<&mut T, ArenaError> {
        let ring = self.stride.ring_of(index);
        let rings = ring.checked_add(1).ok_or(CoordError::Overflow {
            rings: ring,
            stride: self.stride.get(),
        })?;
        let outcome = self.ensure(rings, self.stride)?;
        if outcome != Ensure::Unchanged {
            tracing::trace!(arena = %self.id, index, ?outcome, "grown on access");
        }
        Ok(&mut self.slots[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn binary() -> Arena<u32> {
        Arena::new(&ArenaConfig::binary()).unwrap()
    }

    #[test]
    fn new_arena_is_unallocated() {
        let a = binary();
        assert_eq!(a.capacity(), 0);
        assert_eq!(a.rings(), 3);
        assert_eq!(a.stride(), Stride::BINARY);
    }

    #[test]
    fn first_ensure_allocates_initial_rings() {
        let mut a = binary();
        let outcome = a.ensure(1, Stride::BINARY).unwrap();
        assert_eq!(
            outcome,
            Ensure::Grown {
                previous: 0,
                capacity: 7
            }
        );
        assert_eq!(a.capacity(), 7);
    }

    #[test]
    fn ensure_within_capacity_is_unchanged() {
        let mut a = binary();
        a.ensure(3, Stride::BINARY).unwrap();
        assert_eq!(a.ensure(2, Stride::BINARY).unwrap(), Ensure::Unchanged);
        assert_eq!(a.capacity(), 7);
    }

    #[test]
    fn growth_keeps_prefix() {
        let mut a = binary();
        for i in 0..7 {
            *a.resolve(i).unwrap() = i as u32 + 10;
        }
        a.ensure(5, Stride::BINARY).unwrap();
        assert_eq!(a.capacity(), 31);
        for i in 0..7 {
            assert_eq!(a.get(i), Some(&(i as u32 + 10)));
        }
        assert!(a.iter().skip(7).all(|(_, &v)| v == 0));
    }

    #[test]
    fn resolve_grows_even_for_reads() {
        let mut a = binary();
        a.ensure(3, Stride::BINARY).unwrap();
        assert_eq!(a.capacity(), 7);
        let value = *a.resolve(20).unwrap();
        assert_eq!(value, 0);
        // Index 20 is in ring 4, so five rings are needed.
        assert_eq!(a.capacity(), 31);
        assert_eq!(a.rings(), 5);
    }

    #[test]
    fn restride_discards_contents() {
        let mut a = binary();
        *a.resolve(1).unwrap() = 42;
        let epoch = a.epoch();

        let outcome = a.ensure(2, Stride::QUAD).unwrap();
        assert_eq!(outcome, Ensure::Restrided { capacity: 21 });
        assert_eq!(a.stride(), Stride::QUAD);
        assert_eq!(a.get(1), Some(&0));
        assert_eq!(a.epoch(), epoch + 1);
    }

    #[test]
    fn restride_same_stride_is_noop() {
        let mut a = binary();
        *a.resolve(1).unwrap() = 42;
        assert!(!a.restride(Stride::BINARY));
        assert_eq!(a.get(1), Some(&42));
    }

    #[test]
    fn clear_releases_storage_and_keeps_rings() {
        let mut a = binary();
        *a.resolve(12).unwrap() = 1;
        assert_eq!(a.rings(), 4);
        a.clear();
        assert_eq!(a.capacity(), 0);
        assert_eq!(a.get(0), None);
        a.ensure(1, Stride::BINARY).unwrap();
        assert_eq!(a.capacity(), 15);
        assert_eq!(a.get(12), Some(&0));
    }

    #[test]
    fn zero_resets_slots_keeps_capacity() {
        let mut a = binary();
        for i in 0..7 {
            *a.resolve(i).unwrap() = 9;
        }
        a.zero();
        assert_eq!(a.capacity(), 7);
        assert!(a.iter().all(|(_, &v)| v == 0));
    }

    #[test]
    fn remove_clears_subtree_only() {
        let mut a = binary();
        a.ensure(4, Stride::BINARY).unwrap();
        for i in 0..15 {
            *a.resolve(i).unwrap() = 1;
        }
        // Index 2 is (1, 1); descendants are 5, 6, 11..15.
        let cleared = a.remove(2);
        assert_eq!(cleared, 7);
        let zeroed: Vec<usize> = a
            .iter()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(zeroed, vec![2, 5, 6, 11, 12, 13, 14]);
    }

    #[test]
    fn remove_root_clears_everything() {
        let mut a = binary();
        for i in 0..7 {
            *a.resolve(i).unwrap() = 1;
        }
        assert_eq!(a.remove(0), 7);
        assert!(a.iter().all(|(_, &v)| v == 0));
    }

    #[test]
    fn remove_on_unallocated_arena_is_harmless() {
        let mut a = binary();
        assert_eq!(a.remove(3), 0);
    }

    #[test]
    fn max_rings_caps_growth() {
        let config = ArenaConfig::binary().with_max_rings(3);
        let mut a: Arena<u32> = Arena::new(&config).unwrap();
        assert!(a.resolve(6).is_ok());
        assert_eq!(
            a.resolve(7).unwrap_err(),
            ArenaError::CapacityExceeded {
                requested_rings: 4,
                max_rings: 3
            }
        );
        assert_eq!(a.capacity(), 7);
    }

    #[test]
    fn rejected_restride_keeps_contents() {
        let config = ArenaConfig::binary().with_max_rings(3);
        let mut a: Arena<u32> = Arena::new(&config).unwrap();
        *a.resolve(5).unwrap() = 42;
        let epoch = a.epoch();

        let err = a.ensure(4, Stride::QUAD).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                requested_rings: 4,
                max_rings: 3
            }
        );
        assert_eq!(a.stride(), Stride::BINARY);
        assert_eq!(a.epoch(), epoch);
        assert_eq!(a.capacity(), 7);
        assert_eq!(a.get(5), Some(&42));
    }

    proptest! {
        #[test]
        fn capacity_after_ensure_is_tree_size(stride in 2u32..6, rings in 3u32..7) {
            let s = Stride::new(stride).unwrap();
            let mut a: Arena<u8> = Arena::new(&ArenaConfig::new(stride)).unwrap();
            a.ensure(rings, s).unwrap();
            prop_assert_eq!(a.capacity(), s.tree_size(rings).unwrap());
        }

        #[test]
        fn growth_preserves_written_slots(
            stride in 2u32..5,
            writes in proptest::collection::vec((0usize..60, 1u32..1000), 1..20),
            extra in 1u32..3,
        ) {
            let s = Stride::new(stride).unwrap();
            let mut a: Arena<u32> = Arena::new(&ArenaConfig::new(stride)).unwrap();
            let mut expected = std::collections::HashMap::new();
            for &(i, v) in &writes {
                *a.resolve(i).unwrap() = v;
                expected.insert(i, v);
            }
            let before = a.capacity();
            a.ensure(a.rings() + extra, s).unwrap();
            prop_assert!(a.capacity() > before);
            for (i, v) in expected {
                prop_assert_eq!(a.get(i), Some(&v));
            }
        }
    }
}
