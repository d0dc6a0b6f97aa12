//! Integration test: heap and pooled stores behave identically and each
//! strategy only accepts its own buffers back.

use fleck_arena::{
    ArenaError, BlockPool, BufferAllocator, BufferStore, HeapAllocator, PoolConfig, RawBuffer,
};
use fleck_core::{Float3, SharedSchema};
use fleck_test_utils::fixtures::{every_kind_schema, particle_schema, UP};

fn exercise(store: &mut BufferStore) {
    let mut window = store.slice_all();
    window.init_all_defaults();
    let (_, mut tail) = window.split_at(2);
    tail.get_named_mut::<Float3>("position")
        .fill(Float3::new(9.0, 9.0, 9.0));
}

fn snapshot(store: &BufferStore) -> Vec<Vec<u8>> {
    store
        .schema()
        .attribute_indices()
        .map(|index| store.column(index).to_vec())
        .collect()
}

#[test]
fn heap_and_pooled_stores_hold_the_same_data() {
    let schema = particle_schema();
    let mut pool = BlockPool::new(PoolConfig::new(16)).unwrap();

    let mut heap_store = BufferStore::new_independent(SharedSchema::clone(&schema), 16).unwrap();
    let mut pool_store = BufferStore::new_pooled(SharedSchema::clone(&schema), &mut pool).unwrap();
    exercise(&mut heap_store);
    exercise(&mut pool_store);

    assert_eq!(snapshot(&heap_store), snapshot(&pool_store));
    assert_eq!(pool_store.view_all().get_named::<Float3>("velocity")[15], UP);

    heap_store.free_buffers();
    pool_store.deallocate_pooled(&mut pool);
    assert_eq!(pool.live_blocks(), 0);
}

#[test]
fn pooled_blocks_are_reused_across_stores() {
    let schema = every_kind_schema();
    let mut pool = BlockPool::new(PoolConfig::new(64)).unwrap();

    let first = BufferStore::new_pooled(SharedSchema::clone(&schema), &mut pool).unwrap();
    let bytes = first.memory_bytes();
    first.deallocate_pooled(&mut pool);
    let cached = pool.cached_blocks();
    assert_eq!(cached, schema.len());
    assert_eq!(pool.memory_bytes(), bytes);

    for _ in 0..100 {
        let store = BufferStore::new_pooled(SharedSchema::clone(&schema), &mut pool).unwrap();
        assert_eq!(pool.cached_blocks(), 0);
        store.deallocate_pooled(&mut pool);
    }
    assert_eq!(pool.cached_blocks(), cached);
    assert_eq!(pool.memory_bytes(), bytes);
}

#[test]
fn reused_pool_blocks_start_zeroed() {
    let schema = particle_schema();
    let mut pool = BlockPool::new(PoolConfig::new(8)).unwrap();
    let mut store = BufferStore::new_pooled(SharedSchema::clone(&schema), &mut pool).unwrap();
    store.slice_all().init_all_defaults();
    store.deallocate_pooled(&mut pool);

    let store = BufferStore::new_pooled(schema, &mut pool).unwrap();
    for buffer in store.buffers() {
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }
    store.deallocate_pooled(&mut pool);
}

#[test]
fn stores_of_different_schemas_share_a_pool() {
    let mut pool = BlockPool::new(PoolConfig::new(10)).unwrap();
    let a = BufferStore::new_pooled(particle_schema(), &mut pool).unwrap();
    let b = BufferStore::new_pooled(every_kind_schema(), &mut pool).unwrap();
    assert_eq!(pool.live_blocks(), 5 + 7);
    a.deallocate_pooled(&mut pool);
    b.deallocate_pooled(&mut pool);
    assert_eq!(pool.live_blocks(), 0);
}

#[test]
fn explicit_allocator_round_trip() {
    let mut heap = HeapAllocator::new();
    let store = BufferStore::allocate(particle_schema(), 3, &mut heap).unwrap();
    assert!(store.buffers().iter().all(|b| b.origin() == heap.id()));
    store.release(&mut heap);
}

#[test]
fn adopted_buffers_round_trip() {
    let schema = particle_schema();
    let buffers: Vec<RawBuffer> = schema
        .types()
        .iter()
        .map(|kind| RawBuffer::new(kind.size() * 4))
        .collect();
    let mut store = BufferStore::from_buffers(schema, 4, buffers).unwrap();
    store.slice_all().init_default_named("alive");
    assert_eq!(store.view_all().get_named::<u8>("alive"), &[1; 4]);
    store.free_buffers();
}

#[test]
fn pool_rejects_stores_it_cannot_size() {
    let mut pool = BlockPool::new(PoolConfig::new(10)).unwrap();
    let err = BufferStore::allocate(particle_schema(), 11, &mut pool).unwrap_err();
    assert_eq!(
        err,
        ArenaError::LengthMismatch {
            expected: 10,
            requested: 11
        }
    );
    assert_eq!(pool.live_blocks(), 0);
}

#[test]
#[should_panic(expected = "returned to pool#")]
fn store_returned_to_foreign_pool_panics() {
    let mut pool_a = BlockPool::new(PoolConfig::new(4)).unwrap();
    let mut pool_b = BlockPool::new(PoolConfig::new(4)).unwrap();
    let store = BufferStore::new_pooled(particle_schema(), &mut pool_a).unwrap();
    store.deallocate_pooled(&mut pool_b);
}

#[test]
#[should_panic(expected = "returned to heap")]
fn pooled_store_released_to_heap_panics() {
    let mut pool = BlockPool::new(PoolConfig::new(4)).unwrap();
    let store = BufferStore::new_pooled(particle_schema(), &mut pool).unwrap();
    store.release(&mut HeapAllocator::new());
}
