//! Container builders with a known slot layout.
//!
//! - [`with_spare`]: values packed at the front of a larger block, so
//!   `push_back` does not reallocate until the spare room is used.
//! - [`ascending`]: `0..n` in a block of exactly `n` slots, so the next
//!   push at either end reallocates.
//! - [`cursors_over`]: one read-only cursor per element.

use gendeque::{ConstCursor, GenDeque};

/// `values` in a block of `capacity` slots, occupying the front.
///
/// # Panics
///
/// Panics if `capacity` is smaller than `values.len()`.
pub fn with_spare<T: Clone>(values: &[T], capacity: usize) -> GenDeque<T> {
    assert!(
        capacity >= values.len(),
        "capacity {capacity} cannot hold {} values",
        values.len()
    );
    let mut deque = GenDeque::with_capacity(capacity);
    for v in values {
        deque.push_back(v.clone());
    }
    deque
}

/// `0..n` with capacity exactly `n` (8 when `n` is zero).
pub fn ascending(n: usize) -> GenDeque<usize> {
    (0..n).collect()
}

/// A read-only cursor at every element, front to back.
pub fn cursors_over<T>(deque: &GenDeque<T>) -> Vec<ConstCursor<T>> {
    let begin = deque.cbegin();
    (0..deque.len())
        .map(|k| begin.offset(k).expect("fresh cursor is live"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_spare_has_requested_capacity() {
        let d = with_spare(&[1, 2, 3], 8);
        assert_eq!(d.len(), 3);
        assert_eq!(d.capacity(), 8);
        assert_eq!(d.stats().reallocations, 0);
    }

    #[test]
    fn ascending_is_full() {
        let d = ascending(4);
        assert_eq!(d.capacity(), 4);
        assert_eq!(d.get(3), Ok(&3));
    }

    #[test]
    fn cursors_over_covers_every_element() {
        let d = ascending(3);
        let cursors = cursors_over(&d);
        assert_eq!(cursors.len(), 3);
        assert_eq!(d.get_at(&cursors[2]), Ok(&2));
        assert_eq!(d.cursor_refs(), 3);
    }
}
