//! Storage block identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`BlockId`] allocation.
static BLOCK_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one slot block allocation.
///
/// Allocated from a monotonic atomic counter via [`BlockId::next`]. Every
/// reallocation, clone and fresh construction gets a new ID, so two blocks
/// never share one even if the allocator hands back the same address. A
/// cursor records the ID of the block it was taken in; positions are only
/// meaningful while the container still owns that block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    /// Allocate a fresh, unique block ID.
    pub fn next() -> Self {
        Self(BLOCK_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = BlockId::next();
        let b = BlockId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
