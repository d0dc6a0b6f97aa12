//! Fleck: typed columnar attribute storage for particle-style simulations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Fleck sub-crates. For most users, adding `fleck` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use fleck::prelude::*;
//!
//! let mut builder = SchemaBuilder::new();
//! builder.add("pos", Float3::ZERO);
//! builder.add("alive", 1u8);
//! let schema = builder.build();
//!
//! let mut store = BufferStore::new_independent(schema, 100).unwrap();
//! {
//!     let mut window = store.slice_all();
//!     window.init_all_defaults();
//!     window.get_named_mut::<Float3>("pos")[7] = Float3::new(1.0, 2.0, 3.0);
//! }
//!
//! {
//!     // A view borrows the store until it goes out of scope.
//!     let view = store.view_all();
//!     assert_eq!(view.get_named::<u8>("alive"), &[1u8; 100][..]);
//!     assert_eq!(view.get_named::<Float3>("pos")[7].y, 2.0);
//! }
//! store.free_buffers();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fleck-core` | Attribute kinds, default values, schemas |
//! | [`arena`] | `fleck-arena` | Buffer stores, allocators, windows |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Attribute kinds, default values, and schemas (`fleck-core`).
///
/// Describe an attribute set with [`types::SchemaBuilder`] and freeze it
/// into a shareable [`types::Schema`].
pub use fleck_core as types;

/// Buffer stores, allocation strategies, and row windows (`fleck-arena`).
///
/// Most users only need [`arena::BufferStore`], [`arena::Window`], and
/// [`arena::View`]; they are also available in the [`prelude`].
pub use fleck_arena as arena;

/// Common imports for typical Fleck usage.
///
/// ```rust
/// use fleck::prelude::*;
/// ```
pub mod prelude {
    // Schema description
    pub use fleck_core::{
        Attribute, AttributeKind, DefaultValue, Schema, SchemaBuilder, SharedSchema,
    };

    // Value types
    pub use fleck_core::{Float2, Float3, RgbaB, RgbaF};

    // Storage
    pub use fleck_arena::{
        BlockPool, BufferAllocator, BufferStore, ColumnsMut, PoolConfig, View, Window,
    };

    // Errors
    pub use fleck_arena::ArenaError;
    pub use fleck_core::CoreError;
}
