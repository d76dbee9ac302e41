//! Stable slot references.
//!
//! A [`Reference`] names a slot by `(arena, index)` rather than by address,
//! so it stays valid when the arena reallocates on growth. The `epoch`
//! field allows O(1) staleness checks after `zero`, `clear` or a restride.

use std::fmt;
use std::hash::{Hash, Hasher};

use ringtree_core::ArenaId;

use crate::arena::Arena;
use crate::error::ArenaError;

/// Logical handle to one arena slot.
///
/// Equality and hashing consider only the arena identity and the slot
/// index: two references to the same slot are equal even if one of them is
/// stale. References from different arenas are never equal; use
/// [`Reference::same_slot`] to have that case reported as an error.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Reference {
    pub(crate) arena: ArenaId,
    pub(crate) epoch: u32,
    pub(crate) index: usize,
}

impl Reference {
    pub(crate) fn new(arena: ArenaId, epoch: u32, index: usize) -> Self {
        Self {
            arena,
            epoch,
            index,
        }
    }

    /// The arena this reference was minted by.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// The arena epoch at minting time.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Flat slot index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Point this reference at another slot of the same arena.
    pub fn rebind(&mut self, index: usize) {
        self.index = index;
    }

    /// A copy of this reference pointing at `index`.
    pub fn with_index(self, index: usize) -> Self {
        Self { index, ..self }
    }

    /// Compare slots, refusing to compare across arenas.
    pub fn same_slot(&self, other: &Reference) -> Result<bool, ArenaError> {
        if self.arena != other.arena {
            return Err(ArenaError::ForeignReference {
                expected: self.arena,
                found: other.arena,
            });
        }
        Ok(self.index == other.index)
    }

    /// Resolve against `arena` without growing it.
    ///
    /// Returns `Ok(None)` if the slot lies beyond current capacity.
    pub fn get<'a, T>(&self, arena: &'a Arena<T>) -> Result<Option<&'a T>, ArenaError> {
        arena.check(self)?;
        Ok(arena.get(self.index))
    }

    /// Resolve against `arena`, growing it to cover the slot if needed.
    pub fn get_mut<'a, T: Default>(
        &self,
        arena: &'a mut Arena<T>,
    ) -> Result<&'a mut T, ArenaError> {
        arena.check(self)?;
        arena.resolve(self.index)
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.arena == other.arena && self.index == other.index
    }
}

impl Eq for Reference {}

impl Hash for Reference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.arena.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reference({}, epoch={}, index={})",
            self.arena, self.epoch, self.index
        )
    }
}
