//! Fixed-length block pool with per-element-size free lists.
//!
//! [`BlockPool`] serves arrays of one configured element count. A request
//! names only the element size, so a pool configured for 1000 rows hands out
//! 1000-byte blocks for `u8` columns and 12000-byte blocks for `Float3`
//! columns. Returned blocks go on a free list keyed by element size and are
//! reused exactly, which keeps churn from fragmenting or growing memory.

use indexmap::IndexMap;

use crate::alloc::{assert_origin, AllocatorId, BufferAllocator, RawBuffer};
use crate::config::PoolConfig;
use crate::error::ArenaError;

/// Pooled allocator for buffer stores of a fixed row count.
///
/// This is the strategy behind
/// [`BufferStore::new_pooled`](crate::BufferStore::new_pooled).
///
/// Not thread-safe; use one pool per thread or wrap it in a lock.
///
/// The `max_blocks` budget counts every block handed out and not yet passed
/// back through [`BufferAllocator::free`]. A block whose store is dropped
/// without [`BufferStore::deallocate_pooled`](crate::BufferStore::deallocate_pooled)
/// (for example during a panic unwind) stays counted as live for the rest
/// of the pool's life.
pub struct BlockPool {
    id: AllocatorId,
    config: PoolConfig,
    /// Element size → blocks returned and ready for reuse.
    free_blocks: IndexMap<usize, Vec<RawBuffer>>,
    /// Blocks currently handed out.
    live: usize,
}

impl BlockPool {
    /// Create an empty pool. No memory is reserved up front.
    pub fn new(config: PoolConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            id: AllocatorId::next(),
            config,
            free_blocks: IndexMap::new(),
            live: 0,
        })
    }

    /// Number of elements in every block.
    pub fn array_length(&self) -> usize {
        self.config.array_length
    }

    /// The pool's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Blocks currently handed out.
    pub fn live_blocks(&self) -> usize {
        self.live
    }

    /// Blocks returned and waiting for reuse.
    pub fn cached_blocks(&self) -> usize {
        self.free_blocks.values().map(Vec::len).sum()
    }

    /// Bytes held by cached blocks.
    pub fn memory_bytes(&self) -> usize {
        self.free_blocks
            .values()
            .flatten()
            .map(RawBuffer::memory_bytes)
            .sum()
    }

    /// Drop every cached block. Live blocks are unaffected.
    pub fn clear(&mut self) {
        self.free_blocks.clear();
    }
}

impl BufferAllocator for BlockPool {
    fn id(&self) -> AllocatorId {
        self.id
    }

    fn allocate(&mut self, element_size: usize, len: usize) -> Result<RawBuffer, ArenaError> {
        if len != self.config.array_length {
            return Err(ArenaError::LengthMismatch {
                expected: self.config.array_length,
                requested: len,
            });
        }

        if self.live >= self.config.max_blocks {
            tracing::warn!(
                pool = %self.id,
                max_blocks = self.config.max_blocks,
                "block pool exhausted"
            );
            return Err(ArenaError::PoolExhausted {
                max_blocks: self.config.max_blocks,
            });
        }

        if let Some(mut block) = self.free_blocks.get_mut(&element_size).and_then(Vec::pop) {
            block.zero();
            self.live += 1;
            tracing::trace!(pool = %self.id, element_size, "reused pooled block");
            return Ok(block);
        }

        let bytes = self
            .config
            .block_bytes(element_size)
            .ok_or(ArenaError::SizeOverflow { element_size, len })?;
        self.live += 1;
        tracing::trace!(pool = %self.id, element_size, bytes, "allocated fresh block");
        Ok(RawBuffer::zeroed(bytes, self.id))
    }

    fn free(&mut self, buffer: RawBuffer) {
        assert_origin(self.id, &buffer);
        let element_size = buffer.len() / self.config.array_length;
        self.live -= 1;
        self.free_blocks.entry(element_size).or_default().push(buffer);
    }
}
