//! The closed catalog of attribute kinds and the Rust types that map onto them.
//!
//! Every attribute column stores exactly one [`AttributeKind`]. The
//! [`Attribute`] trait ties a concrete plain-old-data type to its kind at
//! compile time; it is sealed, so the set of storable types cannot grow
//! outside this module.

// `derive(Pod, Zeroable)` expands to `unsafe impl` blocks.
#![allow(unsafe_code)]

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::CoreError;

/// Size in bytes of the largest attribute kind ([`AttributeKind::RgbaF`]).
///
/// This is the capacity of every [`DefaultValue`](crate::DefaultValue).
pub const MAX_ATTRIBUTE_SIZE: usize = 16;

/// Primitive type of an attribute column.
///
/// The discriminants are stable and used by [`AttributeKind::try_from`]
/// when decoding a raw kind byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AttributeKind {
    /// One unsigned byte (`u8`).
    Byte = 0,
    /// A signed 32-bit integer (`i32`).
    Int32 = 1,
    /// A single-precision float (`f32`).
    Float32 = 2,
    /// Two floats ([`Float2`]).
    Float2 = 3,
    /// Three floats ([`Float3`]).
    Float3 = 4,
    /// An 8-bit-per-channel color ([`RgbaB`]).
    RgbaB = 5,
    /// A float-per-channel color ([`RgbaF`]).
    RgbaF = 6,
}

impl AttributeKind {
    /// Every kind, in discriminant order.
    pub const ALL: [AttributeKind; 7] = [
        Self::Byte,
        Self::Int32,
        Self::Float32,
        Self::Float2,
        Self::Float3,
        Self::RgbaB,
        Self::RgbaF,
    ];

    /// Byte size of one element of this kind.
    ///
    /// This is the per-row stride of a column holding this kind.
    pub const fn size(self) -> usize {
        match self {
            Self::Byte => std::mem::size_of::<u8>(),
            Self::Int32 => std::mem::size_of::<i32>(),
            Self::Float32 => std::mem::size_of::<f32>(),
            Self::Float2 => std::mem::size_of::<Float2>(),
            Self::Float3 => std::mem::size_of::<Float3>(),
            Self::RgbaB => std::mem::size_of::<RgbaB>(),
            Self::RgbaF => std::mem::size_of::<RgbaF>(),
        }
    }

    /// Short lowercase name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Int32 => "int32",
            Self::Float32 => "float32",
            Self::Float2 => "float2",
            Self::Float3 => "float3",
            Self::RgbaB => "rgba_b",
            Self::RgbaF => "rgba_f",
        }
    }

    /// Decode a raw kind byte, panicking on unknown values.
    ///
    /// An unknown discriminant means the byte was corrupted or produced by a
    /// logic bug. Use [`AttributeKind::try_from`] when the byte comes from
    /// untrusted input.
    ///
    /// # Panics
    ///
    /// Panics if `raw` is not a valid discriminant.
    pub fn from_raw(raw: u8) -> Self {
        match Self::try_from(raw) {
            Ok(kind) => kind,
            Err(err) => panic!("{err}"),
        }
    }
}

impl TryFrom<u8> for AttributeKind {
    type Error = CoreError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(raw as usize)
            .copied()
            .ok_or(CoreError::UnknownKind { raw })
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two packed floats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Float2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Float2 {
    /// Creates a new two-component vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Three packed floats, e.g. a particle position or velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Float3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Float3 {
    /// Creates a new three-component vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
}

/// An RGBA color with one byte per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RgbaB {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl RgbaB {
    /// Creates a new byte color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// An RGBA color with one float per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RgbaF {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl RgbaF {
    /// Creates a new float color.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for super::Float2 {}
    impl Sealed for super::Float3 {}
    impl Sealed for super::RgbaB {}
    impl Sealed for super::RgbaF {}
}

/// A Rust type that can be stored in an attribute column.
///
/// Implemented only for the types listed in [`AttributeKind`]. Typed column
/// access compares `T::KIND` against the schema's recorded kind before
/// reinterpreting any bytes.
pub trait Attribute: Pod + sealed::Sealed {
    /// The kind this type is stored as.
    const KIND: AttributeKind;
}

impl Attribute for u8 {
    const KIND: AttributeKind = AttributeKind::Byte;
}

impl Attribute for i32 {
    const KIND: AttributeKind = AttributeKind::Int32;
}

impl Attribute for f32 {
    const KIND: AttributeKind = AttributeKind::Float32;
}

impl Attribute for Float2 {
    const KIND: AttributeKind = AttributeKind::Float2;
}

impl Attribute for Float3 {
    const KIND: AttributeKind = AttributeKind::Float3;
}

impl Attribute for RgbaB {
    const KIND: AttributeKind = AttributeKind::RgbaB;
}

impl Attribute for RgbaF {
    const KIND: AttributeKind = AttributeKind::RgbaF;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_rust_types() {
        assert_eq!(AttributeKind::Byte.size(), 1);
        assert_eq!(AttributeKind::Int32.size(), 4);
        assert_eq!(AttributeKind::Float32.size(), 4);
        assert_eq!(AttributeKind::Float2.size(), 8);
        assert_eq!(AttributeKind::Float3.size(), 12);
        assert_eq!(AttributeKind::RgbaB.size(), 4);
        assert_eq!(AttributeKind::RgbaF.size(), 16);
    }

    #[test]
    fn max_size_covers_every_kind() {
        let largest = AttributeKind::ALL.iter().map(|k| k.size()).max().unwrap();
        assert_eq!(largest, MAX_ATTRIBUTE_SIZE);
    }

    #[test]
    fn kind_constants_agree_with_size_of() {
        fn check<T: Attribute>() {
            assert_eq!(T::KIND.size(), std::mem::size_of::<T>(), "{}", T::KIND);
        }
        check::<u8>();
        check::<i32>();
        check::<f32>();
        check::<Float2>();
        check::<Float3>();
        check::<RgbaB>();
        check::<RgbaF>();
    }

    #[test]
    fn raw_round_trip_for_all_kinds() {
        for kind in AttributeKind::ALL {
            assert_eq!(AttributeKind::try_from(kind as u8), Ok(kind));
        }
    }

    #[test]
    fn unknown_raw_kind_is_an_error() {
        assert_eq!(
            AttributeKind::try_from(7),
            Err(CoreError::UnknownKind { raw: 7 })
        );
    }

    #[test]
    #[should_panic(expected = "unknown attribute kind 200")]
    fn from_raw_panics_on_unknown_kind() {
        AttributeKind::from_raw(200);
    }

    #[test]
    fn display_uses_short_name() {
        assert_eq!(AttributeKind::Float3.to_string(), "float3");
        assert_eq!(AttributeKind::RgbaB.to_string(), "rgba_b");
    }
}
