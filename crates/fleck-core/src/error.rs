//! Error types for schema-level operations.
//!
//! Only data-dependent failures are reported here. Programmer errors such as
//! an out-of-range attribute index panic at the call site instead.

use std::error::Error;
use std::fmt;

/// Errors from decoding or validating schema data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// A raw kind byte does not name any [`AttributeKind`](crate::AttributeKind).
    UnknownKind {
        /// The undecodable byte.
        raw: u8,
    },
    /// A default value does not fit in a
    /// [`DefaultValue`](crate::DefaultValue).
    DefaultTooLarge {
        /// Length of the rejected byte slice.
        len: usize,
        /// Capacity of a default value.
        capacity: usize,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { raw } => write!(f, "unknown attribute kind {raw}"),
            Self::DefaultTooLarge { len, capacity } => {
                write!(
                    f,
                    "default value of {len} bytes exceeds capacity of {capacity} bytes"
                )
            }
        }
    }
}

impl Error for CoreError {}
