//! Columnar attribute storage for a fixed number of rows.
//!
//! A [`BufferStore`] owns one [`RawBuffer`] per schema attribute. Buffer
//! `i` holds at least `size * schema.type_of(i).size()` bytes; element `r`
//! of attribute `i` lives at byte offset `r * stride`. All row-range access
//! goes through [`Window`] and [`View`].

use fleck_core::{AttributeKind, Schema, SharedSchema};
use smallvec::SmallVec;

use crate::alloc::{BufferAllocator, RawBuffer};
use crate::error::ArenaError;
use crate::heap::HeapAllocator;
use crate::pool::BlockPool;
use crate::window::{check_range, View, Window};

/// One buffer per attribute of a shared schema, `size` rows each.
///
/// Build with the strategy-specific constructors and release with the
/// matching teardown:
///
/// | Constructor | Teardown |
/// |---|---|
/// | [`new_independent`](Self::new_independent) | [`free_buffers`](Self::free_buffers) |
/// | [`new_pooled`](Self::new_pooled) | [`deallocate_pooled`](Self::deallocate_pooled) |
/// | [`allocate`](Self::allocate) | [`release`](Self::release) |
///
/// Returning buffers to an allocator that did not produce them panics.
/// Dropping a store without releasing it frees its memory, but a pool does
/// not get the blocks back and still counts them as live against its
/// `max_blocks` budget.
pub struct BufferStore {
    schema: SharedSchema,
    buffers: Vec<RawBuffer>,
    size: usize,
}

impl BufferStore {
    /// Adopt pre-allocated buffers without allocating.
    ///
    /// `buffers[i]` backs attribute `i` and must hold at least
    /// `size * stride(i)` bytes. Larger buffers are accepted; only the
    /// leading bytes are addressed.
    pub fn from_buffers(
        schema: SharedSchema,
        size: usize,
        buffers: Vec<RawBuffer>,
    ) -> Result<Self, ArenaError> {
        if buffers.len() != schema.len() {
            return Err(ArenaError::BufferCountMismatch {
                expected: schema.len(),
                actual: buffers.len(),
            });
        }
        for (index, name, kind) in schema.iter() {
            let required = column_bytes(kind, size)?;
            let actual = buffers[index].len();
            if actual < required {
                return Err(ArenaError::BufferTooSmall {
                    attribute: name.to_string(),
                    required,
                    actual,
                });
            }
        }
        Ok(Self {
            schema,
            buffers,
            size,
        })
    }

    /// Allocate one buffer per attribute from `allocator`.
    ///
    /// If any allocation fails, the buffers acquired so far are returned to
    /// `allocator` and the error is propagated.
    pub fn allocate<A: BufferAllocator>(
        schema: SharedSchema,
        size: usize,
        allocator: &mut A,
    ) -> Result<Self, ArenaError> {
        let mut buffers = Vec::with_capacity(schema.len());
        for &kind in schema.types() {
            match allocator.allocate(kind.size(), size) {
                Ok(buffer) => buffers.push(buffer),
                Err(err) => {
                    for buffer in buffers {
                        allocator.free(buffer);
                    }
                    return Err(err);
                }
            }
        }
        let store = Self {
            schema,
            buffers,
            size,
        };
        tracing::debug!(
            schema = %store.schema.id(),
            allocator = %allocator.id(),
            rows = size,
            bytes = store.memory_bytes(),
            "buffer store allocated"
        );
        Ok(store)
    }

    /// Allocate every buffer independently on the heap.
    ///
    /// Release with [`free_buffers`](Self::free_buffers).
    pub fn new_independent(schema: SharedSchema, size: usize) -> Result<Self, ArenaError> {
        Self::allocate(schema, size, &mut HeapAllocator::new())
    }

    /// Allocate every buffer from `pool`. The row count is the pool's
    /// configured array length.
    ///
    /// Release with [`deallocate_pooled`](Self::deallocate_pooled) on the
    /// same pool.
    pub fn new_pooled(schema: SharedSchema, pool: &mut BlockPool) -> Result<Self, ArenaError> {
        let size = pool.array_length();
        Self::allocate(schema, size, pool)
    }

    /// Free buffers obtained by [`new_independent`](Self::new_independent).
    ///
    /// # Panics
    ///
    /// Panics if any buffer came from a pool.
    pub fn free_buffers(self) {
        self.release(&mut HeapAllocator::new());
    }

    /// Return buffers obtained by [`new_pooled`](Self::new_pooled) to `pool`.
    ///
    /// # Panics
    ///
    /// Panics if any buffer did not come from `pool`.
    pub fn deallocate_pooled(self, pool: &mut BlockPool) {
        self.release(pool);
    }

    /// Return every buffer to `allocator`, once per attribute.
    ///
    /// # Panics
    ///
    /// Panics if any buffer did not come from `allocator`.
    pub fn release<A: BufferAllocator>(self, allocator: &mut A) {
        tracing::debug!(
            schema = %self.schema.id(),
            allocator = %allocator.id(),
            rows = self.size,
            "buffer store released"
        );
        for buffer in self.buffers {
            allocator.free(buffer);
        }
    }

    /// The schema describing the columns.
    pub fn schema(&self) -> &SharedSchema {
        &self.schema
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Kind of attribute `index`. Panics if out of range.
    pub fn get_type(&self, index: usize) -> AttributeKind {
        self.schema.type_of(index)
    }

    /// All `size` rows of attribute `index` as raw bytes.
    pub fn column(&self, index: usize) -> &[u8] {
        let stride = self.schema.type_of(index).size();
        &self.buffers[index].as_bytes()[..self.size * stride]
    }

    /// All `size` rows of attribute `index` as raw bytes, mutably.
    pub fn column_mut(&mut self, index: usize) -> &mut [u8] {
        let stride = self.schema.type_of(index).size();
        &mut self.buffers[index].as_bytes_mut()[..self.size * stride]
    }

    /// The backing buffers, indexed by attribute.
    pub fn buffers(&self) -> &[RawBuffer] {
        &self.buffers
    }

    /// Give up ownership of the buffers without returning them anywhere.
    pub fn into_buffers(self) -> Vec<RawBuffer> {
        self.buffers
    }

    /// Bytes held by the backing buffers.
    pub fn memory_bytes(&self) -> usize {
        self.buffers.iter().map(RawBuffer::memory_bytes).sum()
    }

    /// A window over every row.
    pub fn slice_all(&mut self) -> Window<'_> {
        self.window(0, self.size)
    }

    /// A window over rows `[start, start + len)`.
    ///
    /// # Panics
    ///
    /// Panics unless `start + len <= self.size()`.
    pub fn window(&mut self, start: usize, len: usize) -> Window<'_> {
        check_range(self.size, start, len);
        let schema: &Schema = &self.schema;
        let columns: SmallVec<_> = self
            .buffers
            .iter_mut()
            .zip(schema.types())
            .map(|(buffer, kind)| {
                let stride = kind.size();
                &mut buffer.as_bytes_mut()[start * stride..(start + len) * stride]
            })
            .collect();
        Window::from_columns(schema, columns, start, len)
    }

    /// A read-only view over every row.
    pub fn view_all(&self) -> View<'_> {
        self.view(0, self.size)
    }

    /// A read-only view over rows `[start, start + len)`.
    ///
    /// # Panics
    ///
    /// Panics unless `start + len <= self.size()`.
    pub fn view(&self, start: usize, len: usize) -> View<'_> {
        check_range(self.size, start, len);
        let columns: SmallVec<_> = self
            .buffers
            .iter()
            .zip(self.schema.types())
            .map(|(buffer, kind)| {
                let stride = kind.size();
                &buffer.as_bytes()[start * stride..(start + len) * stride]
            })
            .collect();
        View::from_columns(&self.schema, columns, start, len)
    }
}

impl std::fmt::Debug for BufferStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferStore")
            .field("schema", &self.schema.id())
            .field("size", &self.size)
            .field("buffers", &self.buffers)
            .finish()
    }
}

fn column_bytes(kind: AttributeKind, rows: usize) -> Result<usize, ArenaError> {
    kind.size()
        .checked_mul(rows)
        .ok_or(ArenaError::SizeOverflow {
            element_size: kind.size(),
            len: rows,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use fleck_core::{Float3, RgbaB, SchemaBuilder};

    fn schema() -> SharedSchema {
        SchemaBuilder::new()
            .with("pos", Float3::ZERO)
            .with("alive", 1u8)
            .with("tint", RgbaB::new(255, 0, 0, 255))
            .build()
    }

    #[test]
    fn independent_store_has_one_buffer_per_attribute() {
        let store = BufferStore::new_independent(schema(), 10).unwrap();
        assert_eq!(store.size(), 10);
        assert_eq!(store.buffers().len(), 3);
        assert_eq!(store.column(0).len(), 120);
        assert_eq!(store.column(1).len(), 10);
        assert_eq!(store.get_type(2), AttributeKind::RgbaB);
        store.free_buffers();
    }

    #[test]
    fn new_buffers_are_zeroed() {
        let store = BufferStore::new_independent(schema(), 4).unwrap();
        for index in store.schema().attribute_indices() {
            assert!(store.column(index).iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn pooled_store_uses_pool_length() {
        let mut pool = BlockPool::new(PoolConfig::new(32)).unwrap();
        let store = BufferStore::new_pooled(schema(), &mut pool).unwrap();
        assert_eq!(store.size(), 32);
        assert_eq!(pool.live_blocks(), 3);
        store.deallocate_pooled(&mut pool);
        assert_eq!(pool.live_blocks(), 0);
        assert_eq!(pool.cached_blocks(), 3);
    }

    #[test]
    fn dropped_pooled_store_stays_counted_against_budget() {
        let mut pool = BlockPool::new(PoolConfig::new(8).with_max_blocks(3)).unwrap();
        drop(BufferStore::new_pooled(schema(), &mut pool).unwrap());
        assert_eq!(pool.live_blocks(), 3);
        assert_eq!(pool.cached_blocks(), 0);
        assert_eq!(
            BufferStore::new_pooled(schema(), &mut pool).unwrap_err(),
            ArenaError::PoolExhausted { max_blocks: 3 }
        );
    }

    #[test]
    fn failed_allocation_returns_acquired_buffers() {
        let mut pool = BlockPool::new(PoolConfig::new(8).with_max_blocks(2)).unwrap();
        let err = BufferStore::new_pooled(schema(), &mut pool).unwrap_err();
        assert_eq!(err, ArenaError::PoolExhausted { max_blocks: 2 });
        assert_eq!(pool.live_blocks(), 0);
        assert_eq!(pool.cached_blocks(), 2);
    }

    #[test]
    fn from_buffers_adopts_without_allocating() {
        let buffers = vec![RawBuffer::new(60), RawBuffer::new(5), RawBuffer::new(64)];
        let store = BufferStore::from_buffers(schema(), 5, buffers).unwrap();
        assert_eq!(store.column(2).len(), 20);
        assert_eq!(store.into_buffers()[2].len(), 64);
    }

    #[test]
    fn from_buffers_rejects_wrong_count() {
        let err = BufferStore::from_buffers(schema(), 5, vec![RawBuffer::new(60)]).unwrap_err();
        assert_eq!(
            err,
            ArenaError::BufferCountMismatch {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn from_buffers_rejects_short_buffer() {
        let buffers = vec![RawBuffer::new(60), RawBuffer::new(4), RawBuffer::new(20)];
        let err = BufferStore::from_buffers(schema(), 5, buffers).unwrap_err();
        assert_eq!(
            err,
            ArenaError::BufferTooSmall {
                attribute: "alive".to_string(),
                required: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn column_mut_is_visible_through_view() {
        let mut store = BufferStore::new_independent(schema(), 3).unwrap();
        store.column_mut(1).copy_from_slice(&[1, 0, 1]);
        assert_eq!(store.view_all().get::<u8>(1), &[1, 0, 1]);
        assert_eq!(store.view(1, 2).get::<u8>(1), &[0, 1]);
    }

    #[test]
    fn empty_schema_store() {
        let store = BufferStore::new_independent(Schema::empty().into_shared(), 100).unwrap();
        assert!(store.buffers().is_empty());
        assert_eq!(store.memory_bytes(), 0);
        assert!(store.view_all().schema().is_empty());
    }

    #[test]
    fn zero_row_store() {
        let mut store = BufferStore::new_independent(schema(), 0).unwrap();
        assert!(store.slice_all().is_empty());
        assert!(store.view_all().get::<Float3>(0).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of bounds for 10 rows")]
    fn window_past_end_panics() {
        let mut store = BufferStore::new_independent(schema(), 10).unwrap();
        store.window(8, 3);
    }

    #[test]
    #[should_panic(expected = "returned to heap")]
    fn pooled_store_freed_as_independent_panics() {
        let mut pool = BlockPool::new(PoolConfig::new(4)).unwrap();
        let store = BufferStore::new_pooled(schema(), &mut pool).unwrap();
        store.free_buffers();
    }

    #[test]
    #[should_panic(expected = "buffer allocated by heap")]
    fn independent_store_deallocated_into_pool_panics() {
        let mut pool = BlockPool::new(PoolConfig::new(4)).unwrap();
        let store = BufferStore::new_independent(schema(), 4).unwrap();
        store.deallocate_pooled(&mut pool);
    }
}
