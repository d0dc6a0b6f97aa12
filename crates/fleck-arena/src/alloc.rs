//! The allocation capability buffer stores are built on.
//!
//! A [`BufferAllocator`] hands out [`RawBuffer`]s and takes them back. Each
//! buffer remembers the [`AllocatorId`] of the allocator that produced it,
//! so returning a buffer to the wrong allocator is caught at the point of
//! the mistake rather than corrupting a free list.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ArenaError;

/// Counter for pool [`AllocatorId`]s. Zero is reserved for the heap.
static ALLOCATOR_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies the allocator a [`RawBuffer`] came from.
///
/// Every [`HeapAllocator`](crate::HeapAllocator) shares [`AllocatorId::HEAP`]
/// because heap buffers can be released anywhere. Each
/// [`BlockPool`](crate::BlockPool) gets a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllocatorId(u64);

impl AllocatorId {
    /// The id shared by all independent heap allocations.
    pub const HEAP: AllocatorId = AllocatorId(0);

    /// Allocate a fresh, unique id. Thread-safe.
    pub fn next() -> Self {
        Self(ALLOCATOR_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AllocatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::HEAP {
            f.write_str("heap")
        } else {
            write!(f, "pool#{}", self.0)
        }
    }
}

/// One attribute's backing memory.
///
/// Storage is a boxed slice of `u32` words so that every element kind
/// (alignment at most 4) can be viewed in place. The byte length may be
/// smaller than the word storage; only the first [`RawBuffer::len`] bytes
/// are exposed.
pub struct RawBuffer {
    words: Box<[u32]>,
    byte_len: usize,
    origin: AllocatorId,
}

impl RawBuffer {
    /// A zeroed heap buffer of `byte_len` bytes.
    ///
    /// Buffers made this way are owned by [`AllocatorId::HEAP`] and may be
    /// adopted by [`BufferStore::from_buffers`](crate::BufferStore::from_buffers).
    pub fn new(byte_len: usize) -> Self {
        Self::zeroed(byte_len, AllocatorId::HEAP)
    }

    pub(crate) fn zeroed(byte_len: usize, origin: AllocatorId) -> Self {
        let words = byte_len.div_ceil(std::mem::size_of::<u32>());
        Self {
            words: vec![0u32; words].into_boxed_slice(),
            byte_len,
            origin,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.byte_len
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.byte_len == 0
    }

    /// The allocator this buffer must be returned to.
    pub fn origin(&self) -> AllocatorId {
        self.origin
    }

    /// The buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u32, u8>(&self.words)[..self.byte_len]
    }

    /// The buffer contents, mutably.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut::<u32, u8>(&mut self.words)[..self.byte_len]
    }

    /// Reset every byte to zero.
    pub fn zero(&mut self) {
        self.words.fill(0);
    }

    /// Memory footprint of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u32>()
    }
}

impl fmt::Debug for RawBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("len", &self.byte_len)
            .field("origin", &self.origin)
            .finish()
    }
}

/// A source of attribute buffers.
///
/// [`BufferStore`](crate::BufferStore) calls [`allocate`](Self::allocate)
/// exactly once per attribute when it is built and [`free`](Self::free)
/// exactly once per attribute when it is released. The store's logic does
/// not depend on which strategy sits behind this trait.
pub trait BufferAllocator {
    /// Identity stamped on every buffer this allocator produces.
    fn id(&self) -> AllocatorId;

    /// Acquire a buffer of `len` elements of `element_size` bytes each.
    fn allocate(&mut self, element_size: usize, len: usize) -> Result<RawBuffer, ArenaError>;

    /// Return a buffer previously produced by this allocator.
    ///
    /// # Panics
    ///
    /// Implementations panic if `buffer.origin() != self.id()`.
    fn free(&mut self, buffer: RawBuffer);
}

/// Fail fast when a buffer is handed to an allocator that did not produce it.
pub(crate) fn assert_origin(allocator: AllocatorId, buffer: &RawBuffer) {
    assert!(
        buffer.origin == allocator,
        "buffer allocated by {} returned to {}",
        buffer.origin,
        allocator
    );
}
