//! Element and generation lifetimes.
//!
//! Uses the drop-counting fixture to check that relocation moves elements
//! without copying or dropping them, and that teardown drops each exactly
//! once.

use gendeque::{DequeConfig, GenDeque};
use gendeque_test_utils::{Counted, DropLedger};

#[test]
fn growth_drops_nothing() {
    let ledger = DropLedger::new();
    let mut d = GenDeque::with_capacity(1);
    for i in 0..100 {
        d.push_back(ledger.mint(i));
        d.push_front(ledger.mint(-i));
    }
    assert!(d.stats().reallocations > 0);
    assert_eq!(ledger.created(), 200);
    assert_eq!(ledger.dropped(), 0);
    drop(d);
    assert_eq!(ledger.dropped(), 200);
}

#[test]
fn popped_values_are_handed_out_not_dropped() {
    let ledger = DropLedger::new();
    let mut d: GenDeque<Counted> = (0..4).map(|i| ledger.mint(i)).collect();
    let back = d.pop_back().unwrap();
    let front = d.pop_front().unwrap();
    assert_eq!(ledger.dropped(), 0);
    assert_eq!((front.value, back.value), (0, 3));
    drop(front);
    drop(back);
    assert_eq!(ledger.dropped(), 2);
    drop(d);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn clone_and_copy_assign_balance() {
    let ledger = DropLedger::new();
    let a: GenDeque<Counted> = (0..3).map(|i| ledger.mint(i)).collect();
    let mut b = a.clone();
    assert_eq!(ledger.live(), 6);
    let c: GenDeque<Counted> = (0..2).map(|i| ledger.mint(i)).collect();
    b.clone_from(&c);
    // b's three originals are gone, replaced by copies of c's two.
    assert_eq!(ledger.live(), 3 + 2 + 2);
    drop((a, b, c));
    assert_eq!(ledger.live(), 0);
}

#[test]
fn move_assign_drops_old_contents() {
    let ledger = DropLedger::new();
    let mut a: GenDeque<Counted> = (0..3).map(|i| ledger.mint(i)).collect();
    let b: GenDeque<Counted> = (0..2).map(|i| ledger.mint(i)).collect();
    a.assign(b);
    assert_eq!(ledger.live(), 2);
    assert_eq!(a.len(), 2);
}

#[test]
fn filled_uses_default() {
    let d: GenDeque<Counted> = GenDeque::filled(4);
    assert_eq!(d.len(), 4);
    assert!(d.iter().all(|c| c.value == 0));
}

#[test]
fn emplace_constructs_once() {
    let ledger = DropLedger::new();
    let mut d = GenDeque::new();
    d.emplace_back_with(|| Counted::with_ledger(&ledger));
    assert_eq!(ledger.created(), 1);
    assert_eq!(ledger.dropped(), 0);
}

#[test]
fn container_carries_on_after_cursors_release_retired_generation() {
    let mut d = GenDeque::from(vec![1, 2, 3]);
    let a = d.cbegin();
    let b = a.clone();
    d.push_back(4);
    assert_eq!(d.cursor_refs(), 0);
    drop(a);
    assert!(b.is_retired());
    drop(b);
    assert_eq!(d.version(), 2);
    let fresh = d.cbegin();
    assert_eq!(d.get_at(&fresh), Ok(&1));
}

#[test]
fn custom_growth_factor() {
    let config = DequeConfig {
        initial_capacity: 2,
        growth_factor: 4,
    };
    let mut d = GenDeque::with_config(config).unwrap();
    for i in 0..3 {
        d.push_back(i);
    }
    assert_eq!(d.capacity(), 8);
    assert_eq!(d.stats().peak_capacity, 8);
    assert_eq!(d.stats().reallocations, 1);
}
