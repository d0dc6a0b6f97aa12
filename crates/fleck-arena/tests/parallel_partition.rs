//! Integration test: partitioned windows processed on worker threads.
//!
//! A store is split into disjoint chunks, each chunk is handed to its own
//! scoped thread, and the result is checked row by row.

use fleck_arena::BufferStore;
use fleck_core::Float3;
use fleck_test_utils::fixtures::particle_schema;

#[test]
fn scoped_threads_write_disjoint_chunks() {
    let mut store = BufferStore::new_independent(particle_schema(), 1000).unwrap();
    store.slice_all().init_all_defaults();

    let chunks = store.slice_all().partition(128);
    assert_eq!(chunks.len(), 8);
    std::thread::scope(|s| {
        for mut chunk in chunks {
            s.spawn(move || {
                let start = chunk.start();
                let positions = chunk.get_named_mut::<Float3>("position");
                for (offset, p) in positions.iter_mut().enumerate() {
                    p.x = (start + offset) as f32;
                }
                chunk.get_named_mut::<f32>("lifetime").fill(start as f32);
            });
        }
    });

    let view = store.view_all();
    let positions = view.get_named::<Float3>("position");
    for (row, p) in positions.iter().enumerate() {
        assert_eq!(p.x, row as f32);
        assert_eq!(p.z, 0.0);
    }
    let lifetime = view.get_named::<f32>("lifetime");
    assert_eq!(lifetime[0], 0.0);
    assert_eq!(lifetime[127], 0.0);
    assert_eq!(lifetime[128], 128.0);
    assert_eq!(lifetime[999], 896.0);
}

#[test]
fn nested_split_then_partition() {
    let mut store = BufferStore::new_independent(particle_schema(), 10).unwrap();
    let (head, tail) = store.slice_all().split_at(4);
    let chunks: Vec<_> = tail.partition(4).into_iter().map(|c| (c.start(), c.len())).collect();
    assert_eq!(chunks, vec![(4, 4), (8, 2)]);
    assert_eq!((head.start(), head.len()), (0, 4));
}

#[test]
fn chunk_larger_than_window_yields_one_chunk() {
    let mut store = BufferStore::new_independent(particle_schema(), 10).unwrap();
    let chunks = store.window(2, 5).partition(100);
    assert_eq!(chunks.len(), 1);
    assert_eq!((chunks[0].start(), chunks[0].len()), (2, 5));
}
