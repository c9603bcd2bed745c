//! Test utilities and fixture element types for gendeque development.
//!
//! Provides a drop-counting element type ([`Counted`] with its shared
//! [`DropLedger`]) for checking that every constructed element is dropped
//! exactly once, plus builder helpers in [`fixtures`] for containers with a
//! known layout.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;
use std::rc::Rc;

/// Shared counters of constructions and drops.
///
/// Every [`Counted`] minted from a ledger (including clones and defaults
/// made through [`Counted::with_ledger`]) reports back to it.
#[derive(Clone, Debug, Default)]
pub struct DropLedger {
    created: Rc<Cell<usize>>,
    dropped: Rc<Cell<usize>>,
}

impl DropLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new element carrying `value`.
    pub fn mint(&self, value: i64) -> Counted {
        self.created.set(self.created.get() + 1);
        Counted {
            value,
            ledger: self.clone(),
        }
    }

    /// Number of elements constructed so far.
    pub fn created(&self) -> usize {
        self.created.get()
    }

    /// Number of elements dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Elements constructed and not yet dropped.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

/// Element type that records its construction and drop in a [`DropLedger`].
#[derive(Debug)]
pub struct Counted {
    pub value: i64,
    ledger: DropLedger,
}

impl Counted {
    /// A zero-valued element minted from `ledger`.
    pub fn with_ledger(ledger: &DropLedger) -> Self {
        ledger.mint(0)
    }
}

/// Defaults report to a private ledger nobody inspects. Use
/// [`Counted::with_ledger`] when the count matters.
impl Default for Counted {
    fn default() -> Self {
        DropLedger::new().mint(0)
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        self.ledger.mint(self.value)
    }
}

impl PartialEq for Counted {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.ledger.dropped.set(self.ledger.dropped.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_counts_mint_clone_and_drop() {
        let ledger = DropLedger::new();
        let a = ledger.mint(7);
        let b = a.clone();
        assert_eq!(ledger.created(), 2);
        assert_eq!(b.value, 7);
        drop(a);
        assert_eq!(ledger.live(), 1);
        drop(b);
        assert_eq!(ledger.dropped(), 2);
        assert_eq!(ledger.live(), 0);
    }
}
