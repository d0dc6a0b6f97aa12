//! Independent heap allocation: one fresh allocation per buffer.

use crate::alloc::{assert_origin, AllocatorId, BufferAllocator, RawBuffer};
use crate::error::ArenaError;

/// Allocates every buffer separately on the heap.
///
/// This is the strategy behind
/// [`BufferStore::new_independent`](crate::BufferStore::new_independent).
/// Buffers of any length can be requested; freeing drops them.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl HeapAllocator {
    /// Create a heap allocator.
    pub fn new() -> Self {
        Self
    }
}

impl BufferAllocator for HeapAllocator {
    fn id(&self) -> AllocatorId {
        AllocatorId::HEAP
    }

    fn allocate(&mut self, element_size: usize, len: usize) -> Result<RawBuffer, ArenaError> {
        let bytes = element_size
            .checked_mul(len)
            .ok_or(ArenaError::SizeOverflow { element_size, len })?;
        Ok(RawBuffer::zeroed(bytes, AllocatorId::HEAP))
    }

    fn free(&mut self, buffer: RawBuffer) {
        assert_origin(AllocatorId::HEAP, &buffer);
        drop(buffer);
    }
}
