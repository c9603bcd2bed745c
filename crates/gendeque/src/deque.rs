//! The generation-tracked double-ended container.
//!
//! [`GenDeque`] is the top-level type. Each mutation goes through the
//! [`Buffer`] first, then through the [`GenerationTracker`], which either
//! bumps the current version (no cursors to notify) or retires it with a
//! [`Retirement`] snapshot. Cursor dereferences go through
//! [`GenDeque::get_at`] and friends, which run the cursor's validity
//! checks before touching storage.

use std::fmt;

use crate::buffer::{Buffer, Relocation};
use crate::config::DequeConfig;
use crate::cursor::{ConstCursor, Cursor, RawCursor, ReadCursor};
use crate::error::{DequeError, Severity};
use crate::generation::{GenerationTracker, Reason, Refresh, Retirement, Window};
use crate::id::BlockId;
use crate::metrics::DequeStats;

/// Double-ended growable sequence with generation-tracked cursors.
///
/// # Assignment
///
/// Rust's `=` drops the old value, which retires its generation with
/// [`Reason::Destroy`]. To keep the container and report assignment to
/// existing cursors instead, use [`Clone::clone_from`] (copy-assignment)
/// or [`GenDeque::assign`] (move-assignment).
pub struct GenDeque<T> {
    /// Element storage. Dropped before `tracker`, so elements are gone by
    /// the time the generation is marked destroyed.
    buffer: Buffer<T>,
    /// Identity of the block `buffer` currently owns.
    block: BlockId,
    /// Current generation.
    tracker: GenerationTracker,
    config: DequeConfig,
    stats: DequeStats,
}

impl<T> GenDeque<T> {
    /// Create an empty container with the default capacity of 8.
    pub fn new() -> Self {
        let config = DequeConfig::default();
        Self::from_parts(Buffer::with_capacity(config.initial_capacity), config)
    }

    /// Create an empty container with room for `capacity` elements.
    ///
    /// `capacity = 0` falls back to the default of 8.
    pub fn with_capacity(capacity: usize) -> Self {
        let config = DequeConfig::default();
        let capacity = if capacity == 0 {
            config.initial_capacity
        } else {
            capacity
        };
        Self::from_parts(Buffer::with_capacity(capacity), config)
    }

    /// Create an empty container from a validated config.
    pub fn with_config(config: DequeConfig) -> Result<Self, DequeError> {
        config.validate()?;
        Ok(Self::from_parts(
            Buffer::with_capacity(config.initial_capacity),
            config,
        ))
    }

    fn from_parts(buffer: Buffer<T>, config: DequeConfig) -> Self {
        let stats = DequeStats {
            peak_capacity: buffer.capacity(),
            ..DequeStats::default()
        };
        Self {
            buffer,
            block: BlockId::next(),
            tracker: GenerationTracker::new(),
            config,
            stats,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the container holds no elements.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Total slot count, including spare room at both ends.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The container's configuration.
    pub fn config(&self) -> &DequeConfig {
        &self.config
    }

    /// Cumulative counters.
    pub fn stats(&self) -> DequeStats {
        self.stats
    }

    /// Version of the current generation.
    pub fn version(&self) -> u64 {
        self.tracker.version()
    }

    /// Number of cursors holding the current generation.
    pub fn cursor_refs(&self) -> usize {
        self.tracker.cursor_refs()
    }

    /// Element at logical index `k`.
    pub fn get(&self, k: usize) -> Result<&T, DequeError> {
        let len = self.len();
        self.buffer.get(k).ok_or(DequeError::OutOfRange {
            index: k as isize,
            len,
        })
    }

    /// Mutable element at logical index `k`.
    pub fn get_mut(&mut self, k: usize) -> Result<&mut T, DequeError> {
        let len = self.len();
        self.buffer.get_mut(k).ok_or(DequeError::OutOfRange {
            index: k as isize,
            len,
        })
    }

    /// The first element, if any.
    pub fn front(&self) -> Option<&T> {
        self.buffer.get(0)
    }

    /// The last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|k| self.buffer.get(k))
    }

    /// Iterate over the elements, front to back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.buffer.iter()
    }

    /// Iterate mutably over the elements, front to back.
    ///
    /// Mutating elements in place does not move them, so it leaves the
    /// generation untouched.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_ {
        self.buffer.iter_mut()
    }

    /// Read-write cursor at the first element.
    pub fn begin(&self) -> Cursor<T> {
        Cursor::from_raw(self.raw_cursor(self.buffer.window().start))
    }

    /// Read-write cursor one past the last element.
    pub fn end(&self) -> Cursor<T> {
        Cursor::from_raw(self.raw_cursor(self.buffer.window().end))
    }

    /// Read-only cursor at the first element.
    pub fn cbegin(&self) -> ConstCursor<T> {
        ConstCursor::from_raw(self.raw_cursor(self.buffer.window().start))
    }

    /// Read-only cursor one past the last element.
    pub fn cend(&self) -> ConstCursor<T> {
        ConstCursor::from_raw(self.raw_cursor(self.buffer.window().end))
    }

    /// Dereference a cursor for reading.
    ///
    /// Fails with [`DequeError::InvalidIterator`] when the cursor's
    /// generation was retired, [`DequeError::OutOfRange`] when the cursor
    /// lies outside the window it was taken in, and
    /// [`DequeError::ForeignCursor`] when it was taken from another
    /// container.
    pub fn get_at<C: ReadCursor<T>>(&self, cursor: &C) -> Result<&T, DequeError> {
        let raw = cursor.raw();
        raw.check_dereference()?;
        self.ensure_owned(raw)?;
        self.slot_at(raw.pos())
    }

    /// Dereference a read-write cursor for writing.
    ///
    /// Same checks as [`get_at`](Self::get_at).
    pub fn get_at_mut(&mut self, cursor: &Cursor<T>) -> Result<&mut T, DequeError> {
        let raw = cursor.raw();
        raw.check_dereference()?;
        self.ensure_owned(raw)?;
        self.slot_at_mut(raw.pos())
    }

    /// Dereference a cursor, tolerating staleness up to `tolerate`.
    ///
    /// A liveness failure at or below `tolerate` is waived as long as the
    /// container still owns the block the cursor was taken in and the
    /// cursor's slot is still occupied. Range errors and foreign cursors
    /// are never waived.
    ///
    /// This is the way to keep reading through a cursor after a push at
    /// the back that did not reallocate: a strict read reports
    /// [`Severity::Mild`], and `get_tolerant(&cursor, Severity::Mild)`
    /// still yields the element.
    pub fn get_tolerant<C: ReadCursor<T>>(
        &self,
        cursor: &C,
        tolerate: Severity,
    ) -> Result<&T, DequeError> {
        let raw = cursor.raw();
        let err = match raw.check_dereference() {
            Ok(()) => {
                self.ensure_owned(raw)?;
                return self.slot_at(raw.pos());
            }
            Err(err) => err,
        };
        match err.severity() {
            Some(severity)
                if severity <= tolerate
                    && raw.block() == self.block
                    && self.window().contains(raw.pos()) =>
            {
                self.slot_at(raw.pos())
            }
            _ => Err(err),
        }
    }

    /// Append a value at the back.
    pub fn push_back(&mut self, value: T) {
        let relocation = self.buffer.push_back(value, &self.config);
        self.after_push_back(Reason::PushBack, relocation);
    }

    /// Construct a value directly in the back slot.
    pub fn emplace_back_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        let relocation = self.buffer.push_back_with(make, &self.config);
        self.after_push_back(Reason::EmplaceBack, relocation);
    }

    /// Prepend a value at the front.
    pub fn push_front(&mut self, value: T) {
        let relocation = self.buffer.push_front(value, &self.config);
        let relocated = self.note_relocation(relocation, "front");
        let window = self.window();
        self.refresh_after_push(Retirement::at(Reason::PushFront, window.begin, window), relocated);
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        let value = self.buffer.pop_back().ok_or(DequeError::EmptyContainer {
            operation: "pop_back",
        })?;
        let window = self.window();
        self.refresh(Retirement::at(Reason::PopBack, window.end, window));
        Ok(value)
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        let value = self.buffer.pop_front().ok_or(DequeError::EmptyContainer {
            operation: "pop_front",
        })?;
        let window = self.window();
        self.refresh(Retirement::at(Reason::PopFront, window.begin - 1, window));
        Ok(value)
    }

    /// Move-assignment: replace this container's contents with `other`'s.
    ///
    /// Cursors taken from `self` beforehand see [`Reason::MoveAssign`].
    /// Cursors taken from `other` stay valid and now refer to `self`.
    pub fn assign(&mut self, mut other: Self) {
        self.refresh(Retirement::wholesale(Reason::MoveAssign));
        std::mem::swap(&mut self.buffer, &mut other.buffer);
        std::mem::swap(&mut self.block, &mut other.block);
        std::mem::swap(&mut self.tracker, &mut other.tracker);
        self.config = other.config;
        self.stats.peak_capacity = self.stats.peak_capacity.max(self.capacity());
        // `other` now owns the old storage and a generation no cursor holds.
    }

    fn window(&self) -> Window {
        let range = self.buffer.window();
        Window::new(range.start as isize, range.end as isize)
    }

    fn raw_cursor(&self, pos: usize) -> RawCursor {
        RawCursor::new(pos as isize, self.window(), self.block, self.tracker.share())
    }

    fn ensure_owned(&self, raw: &RawCursor) -> Result<(), DequeError> {
        if self.tracker.holds(raw.generation()) && raw.block() == self.block {
            Ok(())
        } else {
            Err(DequeError::ForeignCursor)
        }
    }

    fn range_error(&self, pos: isize) -> DequeError {
        DequeError::OutOfRange {
            index: pos - self.window().begin,
            len: self.len(),
        }
    }

    fn slot_at(&self, pos: isize) -> Result<&T, DequeError> {
        usize::try_from(pos)
            .ok()
            .and_then(|p| self.buffer.slot(p))
            .ok_or_else(|| self.range_error(pos))
    }

    fn slot_at_mut(&mut self, pos: isize) -> Result<&mut T, DequeError> {
        let err = self.range_error(pos);
        usize::try_from(pos)
            .ok()
            .and_then(|p| self.buffer.slot_mut(p))
            .ok_or(err)
    }

    fn after_push_back(&mut self, reason: Reason, relocation: Option<Relocation>) {
        let relocated = self.note_relocation(relocation, "back");
        let window = self.window();
        self.refresh_after_push(Retirement::at(reason, window.end - 1, window), relocated);
    }

    fn refresh_after_push(&mut self, retirement: Retirement, relocated: bool) {
        if relocated {
            self.refresh(retirement.after_relocation());
        } else {
            self.refresh(retirement);
        }
    }

    /// Record a growth step. Returns whether one happened.
    fn note_relocation(&mut self, relocation: Option<Relocation>, end: &'static str) -> bool {
        let Some(relocation) = relocation else {
            return false;
        };
        self.block = BlockId::next();
        self.stats.reallocations += 1;
        self.stats.peak_capacity = self.stats.peak_capacity.max(relocation.new_capacity);
        tracing::debug!(
            end,
            old_capacity = relocation.old_capacity,
            new_capacity = relocation.new_capacity,
            shift = relocation.shift,
            len = self.len(),
            "deque storage reallocated"
        );
        true
    }

    fn refresh(&mut self, retirement: Retirement) {
        match self.tracker.refresh(retirement) {
            Refresh::Bumped => self.stats.in_place_bumps += 1,
            Refresh::Retired => self.stats.retirements += 1,
        }
    }
}

impl<T: Default> GenDeque<T> {
    /// Create a container of `n` default-constructed elements, with
    /// capacity exactly `n`.
    ///
    /// `n = 0` behaves like [`GenDeque::new`].
    pub fn filled(n: usize) -> Self {
        if n == 0 {
            return Self::new();
        }
        Self::from_parts(Buffer::filled(n), DequeConfig::default())
    }
}

impl<T: Clone> GenDeque<T> {
    /// Append a clone of `value` at the back.
    pub fn push_back_cloned(&mut self, value: &T) {
        self.push_back(value.clone());
    }

    /// Prepend a clone of `value` at the front.
    pub fn push_front_cloned(&mut self, value: &T) {
        self.push_front(value.clone());
    }
}

impl<T> Default for GenDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy construction and copy-assignment.
///
/// A clone has the same capacity and element offsets as its source, a
/// fresh generation at version 1, and no cursors.
impl<T: Clone> Clone for GenDeque<T> {
    fn clone(&self) -> Self {
        Self::from_parts(self.buffer.clone(), self.config)
    }

    /// Copy-assignment: cursors taken from `self` beforehand see
    /// [`Reason::CopyAssign`].
    fn clone_from(&mut self, source: &Self) {
        self.refresh(Retirement::wholesale(Reason::CopyAssign));
        self.buffer = source.buffer.clone();
        self.block = BlockId::next();
        self.config = source.config;
        self.stats.peak_capacity = self.stats.peak_capacity.max(self.capacity());
    }
}

impl<T> From<Vec<T>> for GenDeque<T> {
    fn from(values: Vec<T>) -> Self {
        if values.is_empty() {
            return Self::new();
        }
        Self::from_parts(Buffer::from_vec(values), DequeConfig::default())
    }
}

impl<T, const N: usize> From<[T; N]> for GenDeque<T> {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}

impl<T> FromIterator<T> for GenDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Extend<T> for GenDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for GenDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for GenDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for GenDeque<T> {}
