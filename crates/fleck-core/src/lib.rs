//! Core types for the Fleck attribute storage engine.
//!
//! This is the leaf crate of the workspace. It defines the closed catalog of
//! attribute kinds, type-erased default values, and the builder/frozen pair
//! that describes an attribute set:
//!
//! ```text
//! SchemaBuilder ──build()──▶ Arc<Schema> ──shared by──▶ BufferStore × N
//! ```
//!
//! Buffer ownership and windowed access live in `fleck-arena`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod builder;
pub mod error;
pub mod id;
pub mod kind;
pub mod schema;
pub mod value;

pub use builder::SchemaBuilder;
pub use error::CoreError;
pub use id::SchemaId;
pub use kind::{Attribute, AttributeKind, Float2, Float3, RgbaB, RgbaF, MAX_ATTRIBUTE_SIZE};
pub use schema::{Schema, SharedSchema};
pub use value::DefaultValue;
