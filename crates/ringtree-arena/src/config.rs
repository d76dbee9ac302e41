//! Arena configuration parameters.

use ringtree_core::Stride;

use crate::error::ArenaError;

/// Configuration for an [`Arena`](crate::Arena) and the tree built on it.
///
/// Validated at construction; the stride is fixed for the lifetime of a
/// tree, while the ring count grows on demand from `initial_rings`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Children per node. Must be at least 2.
    pub stride: u32,

    /// Ring count reserved by the first allocation.
    ///
    /// Default: 3 (7 slots for a binary tree, 21 for a quad tree).
    pub initial_rings: u32,

    /// Optional hard cap on the ring count.
    ///
    /// Growth past this depth fails with
    /// [`ArenaError::CapacityExceeded`]. `None` means the only limit is
    /// `usize` overflow of the slot count.
    pub max_rings: Option<u32>,
}

impl ArenaConfig {
    /// Default initial ring count.
    pub const DEFAULT_INITIAL_RINGS: u32 = 3;

    /// Create a config for the given stride with default ring settings.
    pub fn new(stride: u32) -> Self {
        Self {
            stride,
            initial_rings: Self::DEFAULT_INITIAL_RINGS,
            max_rings: None,
        }
    }

    /// Config for a binary (stride 2) tree.
    pub fn binary() -> Self {
        Self::new(Stride::BINARY.get())
    }

    /// Config for a quaternary (stride 4) tree.
    pub fn quad() -> Self {
        Self::new(Stride::QUAD.get())
    }

    /// Set the initial ring count.
    pub fn with_initial_rings(mut self, rings: u32) -> Self {
        self.initial_rings = rings;
        self
    }

    /// Cap the ring count.
    pub fn with_max_rings(mut self, rings: u32) -> Self {
        self.max_rings = Some(rings);
        self
    }

    /// Check the config and return the validated stride.
    ///
    /// Rejects strides below 2 and an `initial_rings` above `max_rings`.
    pub fn validate(&self) -> Result<Stride, ArenaError> {
        let stride = Stride::new(self.stride)?;
        if let Some(max) = self.max_rings {
            if self.initial_rings > max {
                return Err(ArenaError::CapacityExceeded {
                    requested_rings: self.initial_rings,
                    max_rings: max,
                });
            }
        }
        stride.tree_size(self.initial_rings)?;
        Ok(stride)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::binary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringtree_core::CoordError;

    #[test]
    fn default_is_binary_with_three_rings() {
        let config = ArenaConfig::default();
        assert_eq!(config.stride, 2);
        assert_eq!(config.initial_rings, 3);
        assert_eq!(config.max_rings, None);
        assert_eq!(config.validate(), Ok(Stride::BINARY));
    }

    #[test]
    fn quad_preset() {
        assert_eq!(ArenaConfig::quad().validate(), Ok(Stride::QUAD));
    }

    #[test]
    fn stride_one_is_rejected() {
        let err = ArenaConfig::new(1).validate().unwrap_err();
        assert_eq!(err, ArenaError::Coord(CoordError::InvalidStride { stride: 1 }));
    }

    #[test]
    fn initial_rings_above_cap_is_rejected() {
        let config = ArenaConfig::binary().with_initial_rings(5).with_max_rings(4);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::CapacityExceeded {
                requested_rings: 5,
                max_rings: 4
            })
        ));
    }

    #[test]
    fn overflowing_initial_rings_is_rejected() {
        let config = ArenaConfig::quad().with_initial_rings(64);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::Coord(CoordError::Overflow { .. }))
        ));
    }
}
