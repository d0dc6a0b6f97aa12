//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while acquiring or adopting attribute buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// `element_size * len` does not fit in `usize`.
    SizeOverflow {
        /// Bytes per element.
        element_size: usize,
        /// Requested element count.
        len: usize,
    },
    /// A block pool has handed out its full budget of blocks.
    PoolExhausted {
        /// The configured block budget.
        max_blocks: usize,
    },
    /// A block pool was asked for an array length it is not configured for.
    LengthMismatch {
        /// The pool's configured array length.
        expected: usize,
        /// The length that was requested.
        requested: usize,
    },
    /// The number of adopted buffers differs from the schema's attribute count.
    BufferCountMismatch {
        /// Attributes in the schema.
        expected: usize,
        /// Buffers supplied.
        actual: usize,
    },
    /// An adopted buffer cannot hold `rows * stride` bytes.
    BufferTooSmall {
        /// Name of the attribute the buffer was meant for.
        attribute: String,
        /// Bytes the attribute needs.
        required: usize,
        /// Bytes the buffer holds.
        actual: usize,
    },
    /// A configuration value failed validation.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeOverflow { element_size, len } => {
                write!(f, "buffer size overflows: {len} elements of {element_size} bytes")
            }
            Self::PoolExhausted { max_blocks } => {
                write!(f, "block pool exhausted: all {max_blocks} blocks are in use")
            }
            Self::LengthMismatch {
                expected,
                requested,
            } => {
                write!(
                    f,
                    "block pool serves arrays of {expected} elements, requested {requested}"
                )
            }
            Self::BufferCountMismatch { expected, actual } => {
                write!(f, "expected {expected} attribute buffers, got {actual}")
            }
            Self::BufferTooSmall {
                attribute,
                required,
                actual,
            } => {
                write!(
                    f,
                    "buffer for attribute '{attribute}' holds {actual} bytes, needs {required}"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
