//! Slot block with a double-ended occupied window.
//!
//! A [`Buffer`] is a fixed-size block of slots. Slots outside the occupied
//! window `[front, back)` are vacant; every slot inside holds a live
//! element. When an end runs out of room the buffer allocates a larger
//! block, moves every live element across, and drops the old block. The
//! two ends grow independently: growth triggered at the back puts all new
//! room at the back, growth triggered at the front puts it all at the front.

use std::ops::Range;

use crate::config::DequeConfig;

/// Description of one growth step, returned by the push operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relocation {
    /// Slot count before growth.
    pub old_capacity: usize,
    /// Slot count after growth.
    pub new_capacity: usize,
    /// How far every live element moved. Zero for back growth;
    /// `new_capacity - old_capacity` for front growth.
    pub shift: usize,
}

/// A block of slots with an occupied window.
///
/// Invariant: `front <= back <= capacity`, every slot in `[front, back)` is
/// `Some`, every other slot is `None`. Moving an element out of a slot
/// always leaves `None` behind, so no element is ever live in two slots.
#[derive(Clone)]
pub struct Buffer<T> {
    /// Backing storage. `None` marks a vacant slot.
    slots: Box<[Option<T>]>,
    /// Index of the first live slot.
    front: usize,
    /// One past the index of the last live slot.
    back: usize,
}

impl<T> Buffer<T> {
    /// Create a buffer of exactly `capacity` vacant slots.
    ///
    /// The occupied window starts empty at slot 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vacant_block(capacity),
            front: 0,
            back: 0,
        }
    }

    /// Create a buffer whose capacity and length both equal `values.len()`.
    pub fn from_vec(values: Vec<T>) -> Self {
        let back = values.len();
        Self {
            slots: values.into_iter().map(Some).collect(),
            front: 0,
            back,
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.back - self.front
    }

    /// Whether the occupied window is empty.
    pub fn is_empty(&self) -> bool {
        self.front == self.back
    }

    /// Total slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Vacant slots before the occupied window.
    pub fn front_room(&self) -> usize {
        self.front
    }

    /// Vacant slots after the occupied window.
    pub fn back_room(&self) -> usize {
        self.slots.len() - self.back
    }

    /// The occupied window, in slot coordinates.
    pub fn window(&self) -> Range<usize> {
        self.front..self.back
    }

    /// Append a value, growing the back if needed.
    pub fn push_back(&mut self, value: T, config: &DequeConfig) -> Option<Relocation> {
        self.push_back_with(|| value, config)
    }

    /// Append the value produced by `make`, constructed directly into the
    /// back slot.
    ///
    /// Growth happens before `make` runs, so a panicking constructor leaves
    /// the buffer consistent.
    pub fn push_back_with<F>(&mut self, make: F, config: &DequeConfig) -> Option<Relocation>
    where
        F: FnOnce() -> T,
    {
        let relocation = if self.back == self.slots.len() {
            Some(self.grow_back(config.grown(self.slots.len())))
        } else {
            None
        };
        self.slots[self.back] = Some(make());
        self.back += 1;
        relocation
    }

    /// Prepend a value, growing the front if needed.
    pub fn push_front(&mut self, value: T, config: &DequeConfig) -> Option<Relocation> {
        let relocation = if self.front == 0 {
            Some(self.grow_front(config.grown(self.slots.len())))
        } else {
            None
        };
        self.front -= 1;
        self.slots[self.front] = Some(value);
        relocation
    }

    /// Remove and return the last element. Never reallocates.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.back -= 1;
        self.slots[self.back].take()
    }

    /// Remove and return the first element. Never reallocates.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.front].take();
        self.front += 1;
        value
    }

    /// Element at logical offset `k` from the front.
    pub fn get(&self, k: usize) -> Option<&T> {
        if k >= self.len() {
            return None;
        }
        self.slots[self.front + k].as_ref()
    }

    /// Mutable element at logical offset `k` from the front.
    pub fn get_mut(&mut self, k: usize) -> Option<&mut T> {
        if k >= self.len() {
            return None;
        }
        self.slots[self.front + k].as_mut()
    }

    /// Element at slot `pos`, if that slot is live.
    pub fn slot(&self, pos: usize) -> Option<&T> {
        self.slots.get(pos).and_then(Option::as_ref)
    }

    /// Mutable element at slot `pos`, if that slot is live.
    pub fn slot_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.slots.get_mut(pos).and_then(Option::as_mut)
    }

    /// Iterate over the live elements, front to back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.slots[self.front..self.back].iter().flatten()
    }

    /// Iterate mutably over the live elements, front to back.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_ {
        self.slots[self.front..self.back].iter_mut().flatten()
    }

    /// Move every live element into a block of `new_capacity` slots at the
    /// same offsets.
    fn grow_back(&mut self, new_capacity: usize) -> Relocation {
        let old_capacity = self.slots.len();
        let mut block = vacant_block(new_capacity);
        for pos in self.front..self.back {
            block[pos] = self.slots[pos].take();
        }
        self.slots = block;
        Relocation {
            old_capacity,
            new_capacity,
            shift: 0,
        }
    }

    /// Move every live element into a block of `new_capacity` slots, with
    /// all added room in front of the window.
    fn grow_front(&mut self, new_capacity: usize) -> Relocation {
        let old_capacity = self.slots.len();
        let shift = new_capacity - old_capacity;
        let mut block = vacant_block(new_capacity);
        for pos in self.front..self.back {
            block[pos + shift] = self.slots[pos].take();
        }
        self.slots = block;
        self.front += shift;
        self.back += shift;
        Relocation {
            old_capacity,
            new_capacity,
            shift,
        }
    }
}

impl<T: Default> Buffer<T> {
    /// Create a buffer of `n` default-constructed elements filling the
    /// whole block.
    pub fn filled(n: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| Some(T::default())).take(n).collect(),
            front: 0,
            back: n,
        }
    }
}

fn vacant_block<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
