//! Buffer ownership and windowed access for Fleck attribute stores.
//!
//! A [`BufferStore`] holds one buffer per attribute of a shared schema.
//! Buffers come from a pluggable [`BufferAllocator`], and row ranges are
//! read and written through borrowed [`Window`]s and [`View`]s.
//!
//! # Architecture
//!
//! ```text
//! BufferStore
//! ├── Arc<Schema> (names, kinds, defaults; shared by every store)
//! ├── RawBuffer × attributes (word-aligned, tagged with AllocatorId)
//! └── borrowed by
//!     ├── Window<'a> (exclusive; slice / split_at / partition)
//!     │   └── ColumnsMut<'w> (each column borrowed once)
//!     └── View<'a>   (shared, read-only)
//!
//! BufferAllocator
//! ├── HeapAllocator (one allocation per buffer, any length)
//! └── BlockPool     (fixed array length, per-element-size free lists)
//! ```
//!
//! # Allocation strategies
//!
//! - **Independent:** [`BufferStore::new_independent`] /
//!   [`BufferStore::free_buffers`].
//! - **Pooled:** [`BufferStore::new_pooled`] /
//!   [`BufferStore::deallocate_pooled`].
//!
//! Every buffer remembers which allocator produced it. Releasing a store
//! through the other strategy, or into a different pool, panics.
//!
//! No `unsafe`: typed column access goes through `bytemuck` casts over
//! word-aligned storage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod alloc;
pub mod config;
pub mod error;
pub mod heap;
pub mod pool;
pub mod store;
pub mod window;

// Public re-exports for the primary API surface.
pub use alloc::{AllocatorId, BufferAllocator, RawBuffer};
pub use config::PoolConfig;
pub use error::ArenaError;
pub use heap::HeapAllocator;
pub use pool::BlockPool;
pub use store::BufferStore;
pub use window::{ColumnsMut, View, Window};
