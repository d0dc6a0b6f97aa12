//! Test utilities for Fleck development.
//!
//! Provides ready-made schemas ([`fixtures`]) and helpers for filling and
//! checking raw column bytes with sentinel patterns, so tests can prove
//! that an operation touched exactly the rows it was meant to.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

/// Byte written over memory that an operation must not touch.
pub const SENTINEL: u8 = 0xAB;

/// Overwrite every byte of `bytes` with [`SENTINEL`].
pub fn fill_sentinel(bytes: &mut [u8]) {
    bytes.fill(SENTINEL);
}

/// Whether every byte of `bytes` still holds [`SENTINEL`].
pub fn is_sentinel(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == SENTINEL)
}

/// Split a column into per-row byte chunks of `stride` bytes.
///
/// Panics if the column length is not a multiple of `stride`.
pub fn rows(column: &[u8], stride: usize) -> Vec<&[u8]> {
    assert_eq!(
        column.len() % stride,
        0,
        "column of {} bytes is not a whole number of {stride}-byte rows",
        column.len()
    );
    column.chunks_exact(stride).collect()
}
