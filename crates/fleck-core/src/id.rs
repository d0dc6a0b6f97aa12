//! Process-unique schema identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`SchemaId`] allocation.
static SCHEMA_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a frozen [`Schema`](crate::Schema).
///
/// Allocated from a monotonic atomic counter via [`SchemaId::next`]. Two
/// schemas built separately always have different IDs, even if they declare
/// the same attributes in the same order. Schema equality compares these
/// IDs, so compatibility between stores is decided by identity, never by
/// structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(u64);

impl SchemaId {
    /// Allocate a fresh, unique schema ID. Thread-safe.
    pub fn next() -> Self {
        Self(SCHEMA_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
