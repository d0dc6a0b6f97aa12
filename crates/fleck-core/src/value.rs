//! Type-erased storage for one attribute's default value.

use std::fmt;

use crate::error::CoreError;
use crate::kind::{Attribute, AttributeKind, MAX_ATTRIBUTE_SIZE};

/// A default value for any one [`AttributeKind`], stored as raw bytes.
///
/// The value does not record its own kind. The schema keeps the kind in a
/// parallel table, and every read goes through that kind: many rows share
/// one discriminant, so it is never stored next to the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultValue {
    storage: [u8; MAX_ATTRIBUTE_SIZE],
}

impl DefaultValue {
    /// An all-zero default, valid for every kind.
    pub const fn zeroed() -> Self {
        Self {
            storage: [0; MAX_ATTRIBUTE_SIZE],
        }
    }

    /// Erase a typed value by copying its bytes.
    pub fn from_value<T: Attribute>(value: T) -> Self {
        const { assert!(std::mem::size_of::<T>() <= MAX_ATTRIBUTE_SIZE) };
        let mut out = Self::zeroed();
        let bytes = bytemuck::bytes_of(&value);
        out.storage[..bytes.len()].copy_from_slice(bytes);
        out
    }

    /// Build a default from raw bytes; trailing capacity is zero-filled.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() > MAX_ATTRIBUTE_SIZE {
            return Err(CoreError::DefaultTooLarge {
                len: bytes.len(),
                capacity: MAX_ATTRIBUTE_SIZE,
            });
        }
        let mut out = Self::zeroed();
        out.storage[..bytes.len()].copy_from_slice(bytes);
        Ok(out)
    }

    /// The meaningful bytes of this value when interpreted as `kind`.
    pub fn bytes(&self, kind: AttributeKind) -> &[u8] {
        &self.storage[..kind.size()]
    }

    /// Reinterpret the stored bytes as `T`.
    ///
    /// The caller is responsible for asking with the type that matches the
    /// kind recorded in the schema; any other type yields garbage, not UB.
    pub fn read<T: Attribute>(&self) -> T {
        bytemuck::pod_read_unaligned(&self.storage[..std::mem::size_of::<T>()])
    }
}

impl Default for DefaultValue {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefaultValue(")?;
        for byte in &self.storage {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
