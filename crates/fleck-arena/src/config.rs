//! Block pool configuration parameters.

use crate::error::ArenaError;

/// Configuration for a [`BlockPool`](crate::BlockPool).
///
/// A pool serves arrays of exactly one element count. Every buffer store
/// allocated from the pool therefore has `array_length` rows. Validated at
/// pool construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of elements (rows) in every block the pool hands out.
    ///
    /// The byte size of a block is `array_length * element_size`, where the
    /// element size is chosen per request. Must be non-zero.
    pub array_length: usize,

    /// Maximum number of blocks that may be handed out at once.
    ///
    /// Default: 4096. Returned blocks are cached for reuse and do not count
    /// against this budget. Must be non-zero.
    pub max_blocks: usize,
}

impl PoolConfig {
    /// Default block budget.
    pub const DEFAULT_MAX_BLOCKS: usize = 4096;

    /// Create a config serving arrays of `array_length` elements.
    pub fn new(array_length: usize) -> Self {
        Self {
            array_length,
            max_blocks: Self::DEFAULT_MAX_BLOCKS,
        }
    }

    /// Builder-style override of [`PoolConfig::max_blocks`].
    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Byte size of one block of `element_size`-byte elements.
    ///
    /// Returns `None` on overflow.
    pub fn block_bytes(&self, element_size: usize) -> Option<usize> {
        self.array_length.checked_mul(element_size)
    }

    /// Check every field against its documented constraints.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.array_length == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "array_length must be non-zero".to_string(),
            });
        }
        if self.max_blocks == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "max_blocks must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_budget() {
        let config = PoolConfig::new(1000);
        assert_eq!(config.array_length, 1000);
        assert_eq!(config.max_blocks, PoolConfig::DEFAULT_MAX_BLOCKS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn block_bytes_scales_with_element_size() {
        let config = PoolConfig::new(100);
        assert_eq!(config.block_bytes(12), Some(1200));
        assert_eq!(PoolConfig::new(usize::MAX).block_bytes(2), None);
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(matches!(
            PoolConfig::new(0).validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert!(matches!(
            PoolConfig::new(8).with_max_blocks(0).validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }
}
