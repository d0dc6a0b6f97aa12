//! Reusable schemas for store and window tests.
//!
//! - [`particle_schema`]: position, velocity, lifetime, alive flag, color.
//! - [`pos_alive_schema`]: the minimal two-attribute particle layout.
//! - [`every_kind_schema`]: one attribute of each kind, with non-zero defaults.

use fleck_core::{Float2, Float3, RgbaB, RgbaF, SchemaBuilder, SharedSchema};

/// Default position used by [`particle_schema`].
pub const ORIGIN: Float3 = Float3::ZERO;

/// Default velocity used by [`particle_schema`].
pub const UP: Float3 = Float3::new(0.0, 0.0, 1.0);

/// Default lifetime used by [`particle_schema`].
pub const LIFETIME: f32 = 2.5;

/// Default color used by [`particle_schema`].
pub const WHITE: RgbaF = RgbaF::new(1.0, 1.0, 1.0, 1.0);

/// A typical particle attribute set.
///
/// | Index | Name | Kind | Default |
/// |---|---|---|---|
/// | 0 | `position` | float3 | [`ORIGIN`] |
/// | 1 | `velocity` | float3 | [`UP`] |
/// | 2 | `lifetime` | float32 | [`LIFETIME`] |
/// | 3 | `alive` | byte | `1` |
/// | 4 | `color` | rgba_f | [`WHITE`] |
pub fn particle_schema() -> SharedSchema {
    SchemaBuilder::new()
        .with("position", ORIGIN)
        .with("velocity", UP)
        .with("lifetime", LIFETIME)
        .with("alive", 1u8)
        .with("color", WHITE)
        .build()
}

/// `{"pos": float3 (0,0,0), "alive": byte 1}`.
pub fn pos_alive_schema() -> SharedSchema {
    SchemaBuilder::new()
        .with("pos", Float3::ZERO)
        .with("alive", 1u8)
        .build()
}

/// One attribute per kind, in kind order, each with a non-zero default.
pub fn every_kind_schema() -> SharedSchema {
    SchemaBuilder::new()
        .with("byte", 7u8)
        .with("int32", -42i32)
        .with("float32", 0.25f32)
        .with("float2", Float2::new(1.5, -1.5))
        .with("float3", Float3::new(1.0, 2.0, 3.0))
        .with("rgba_b", RgbaB::new(10, 20, 30, 40))
        .with("rgba_f", RgbaF::new(0.1, 0.2, 0.3, 0.4))
        .build()
}
