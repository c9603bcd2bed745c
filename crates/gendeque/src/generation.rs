//! Generation records and the liveness protocol.
//!
//! A [`Generation`] represents one stable epoch of a container's storage.
//! The container holds the current record through a [`GenerationTracker`];
//! every cursor holds an `Rc` clone of the record that was current when it
//! was taken. The record is freed when the last of those holders goes away.
//!
//! On each end-mutation the tracker either bumps the version in place (no
//! cursor holds the record, so nobody can observe the jump) or retires the
//! record with a [`Retirement`] snapshot and adopts a fresh record at the
//! next version. Retired records never change again; cursors attached to
//! them evaluate [`check_liveness`] against the snapshot.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::{DequeError, Severity};

/// The mutation that retired a generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reason {
    /// An element was appended at the back.
    PushBack,
    /// The last element was removed.
    PopBack,
    /// An element was prepended at the front.
    PushFront,
    /// The first element was removed.
    PopFront,
    /// An element was constructed in place at the back.
    EmplaceBack,
    /// The container's contents were replaced by a copy of another's.
    CopyAssign,
    /// The container's contents were replaced by moving another's in.
    MoveAssign,
    /// The container was dropped.
    Destroy,
}

impl Reason {
    /// Short kebab-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PushBack => "push-back",
            Self::PopBack => "pop-back",
            Self::PushFront => "push-front",
            Self::PopFront => "pop-front",
            Self::EmplaceBack => "emplace-back",
            Self::CopyAssign => "copy-assign",
            Self::MoveAssign => "move-assign",
            Self::Destroy => "destroy",
        }
    }

    fn is_pop(self) -> bool {
        matches!(self, Self::PopBack | Self::PopFront)
    }

    fn is_end_mutation(self) -> bool {
        matches!(
            self,
            Self::PushBack | Self::PopBack | Self::PushFront | Self::PopFront | Self::EmplaceBack
        )
    }

    fn is_front(self) -> bool {
        matches!(self, Self::PushFront | Self::PopFront)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open range of slot positions `[begin, end)`.
///
/// Positions are signed: a cursor stepped back from slot 0 sits at -1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    /// First position inside the window.
    pub begin: isize,
    /// One past the last position inside the window.
    pub end: isize,
}

impl Window {
    /// Create a window from its bounds.
    pub fn new(begin: isize, end: isize) -> Self {
        Self { begin, end }
    }

    /// Whether `pos` lies in `[begin, end)`.
    pub fn contains(&self, pos: isize) -> bool {
        self.begin <= pos && pos < self.end
    }

    /// Number of positions in the window.
    pub fn len(&self) -> usize {
        (self.end - self.begin).max(0) as usize
    }

    /// Whether the window holds no positions.
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }
}

/// Why and where a generation was retired.
///
/// `location` and `window` are expressed in the slot coordinates of the
/// block the container owned right after the mutation. When the mutation
/// moved every element to a new block, `relocated` is set and no position
/// from the old block lies inside `window`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retirement {
    /// The mutation that retired the generation.
    pub reason: Reason,
    /// The slot the mutation touched, for end-mutations.
    pub location: Option<isize>,
    /// The occupied window just after the mutation, for end-mutations.
    pub window: Option<Window>,
    /// The mutation moved every element to a new block.
    pub relocated: bool,
}

impl Retirement {
    /// An end-mutation retirement touching `location`, leaving `window`
    /// occupied.
    pub fn at(reason: Reason, location: isize, window: Window) -> Self {
        Self {
            reason,
            location: Some(location),
            window: Some(window),
            relocated: false,
        }
    }

    /// A retirement that replaces or destroys the whole storage, with no
    /// location.
    pub fn wholesale(reason: Reason) -> Self {
        Self {
            reason,
            location: None,
            window: None,
            relocated: false,
        }
    }

    /// Mark the mutation as having moved the storage to a new block.
    pub fn after_relocation(self) -> Self {
        Self {
            relocated: true,
            ..self
        }
    }

    /// Whether `pos`, taken in the retired generation's block, lies
    /// outside the recorded window.
    fn is_outside(&self, pos: isize) -> bool {
        self.relocated || self.window.is_some_and(|w| !w.contains(pos))
    }
}

/// One epoch of storage validity.
///
/// Live while `retirement()` is `None`. A retired record is immutable.
#[derive(Debug)]
pub struct Generation {
    version: Cell<u64>,
    retirement: Cell<Option<Retirement>>,
}

impl Generation {
    fn new(version: u64) -> Self {
        Self {
            version: Cell::new(version),
            retirement: Cell::new(None),
        }
    }

    /// The record's version number.
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// The retirement snapshot, or `None` while the record is live.
    pub fn retirement(&self) -> Option<Retirement> {
        self.retirement.get()
    }

    /// Whether the record has been retired.
    pub fn is_retired(&self) -> bool {
        self.retirement.get().is_some()
    }

    fn retire(&self, retirement: Retirement) {
        debug_assert!(!self.is_retired(), "generation retired twice");
        self.retirement.set(Some(retirement));
    }
}

/// Which path a [`GenerationTracker::refresh`] call took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// No cursor held the record; its version was bumped in place.
    Bumped,
    /// Cursors held the record; it was retired and replaced.
    Retired,
}

/// Owner of a container's current [`Generation`].
///
/// Dropping the tracker retires the current record with
/// [`Reason::Destroy`]; cursors still holding it keep it alive and see
/// the destruction on their next use.
#[derive(Debug)]
pub struct GenerationTracker {
    current: Rc<Generation>,
}

impl GenerationTracker {
    /// First version handed out by a new tracker.
    pub const INITIAL_VERSION: u64 = 1;

    /// Create a tracker holding a fresh record at [`Self::INITIAL_VERSION`].
    pub fn new() -> Self {
        Self {
            current: Rc::new(Generation::new(Self::INITIAL_VERSION)),
        }
    }

    /// A shared hold on the current record, for a new cursor.
    pub fn share(&self) -> Rc<Generation> {
        Rc::clone(&self.current)
    }

    /// Whether `generation` is this tracker's current record.
    pub fn holds(&self, generation: &Rc<Generation>) -> bool {
        Rc::ptr_eq(&self.current, generation)
    }

    /// Version of the current record.
    pub fn version(&self) -> u64 {
        self.current.version()
    }

    /// Number of cursors holding the current record.
    pub fn cursor_refs(&self) -> usize {
        Rc::strong_count(&self.current) - 1
    }

    /// Bump the current version in place if no cursor holds the record.
    ///
    /// Returns `true` when the bump happened.
    pub fn bump_if_unreferenced(&self) -> bool {
        if self.cursor_refs() != 0 {
            return false;
        }
        self.current.version.set(self.current.version() + 1);
        true
    }

    /// Retire the current record and adopt a fresh one at the next version.
    pub fn retire(&mut self, retirement: Retirement) {
        let next = self.current.version() + 1;
        tracing::trace!(
            version = self.current.version(),
            cursors = self.cursor_refs(),
            reason = %retirement.reason,
            "generation retired"
        );
        self.current.retire(retirement);
        self.current = Rc::new(Generation::new(next));
    }

    /// Bump in place when unreferenced, otherwise retire with `retirement`.
    pub fn refresh(&mut self, retirement: Retirement) -> Refresh {
        if self.bump_if_unreferenced() {
            tracing::trace!(version = self.current.version(), "generation bumped in place");
            Refresh::Bumped
        } else {
            self.retire(retirement);
            Refresh::Retired
        }
    }
}

impl Default for GenerationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for GenerationTracker {
    fn drop(&mut self) {
        let cursors = self.cursor_refs();
        if cursors > 0 {
            tracing::debug!(
                version = self.current.version(),
                cursors,
                "container destroyed with live cursors"
            );
        }
        self.current.retire(Retirement::wholesale(Reason::Destroy));
    }
}

/// Decide whether a cursor at `pos` may still navigate under `generation`.
///
/// Live generations always pass. For retired ones the rules are checked
/// in order and the first match decides the severity:
///
/// 1. destroyed: `Severe`
/// 2. copy- or move-assigned: `Moderate`
/// 3. popped and `pos` is the removed slot: `Severe`
/// 4. any end-mutation and `pos` is outside the recorded window, or the
///    mutation relocated the storage: `Moderate`
/// 5. front push or pop: `Warning`
/// 6. otherwise: `Mild`
pub fn check_liveness(generation: &Generation, pos: isize) -> Result<(), DequeError> {
    let Some(retirement) = generation.retirement() else {
        return Ok(());
    };
    let reason = retirement.reason;
    let outside = retirement.is_outside(pos);
    let severity = match reason {
        Reason::Destroy => Severity::Severe,
        Reason::CopyAssign | Reason::MoveAssign => Severity::Moderate,
        _ if reason.is_pop() && retirement.location == Some(pos) => Severity::Severe,
        _ if reason.is_end_mutation() && outside => Severity::Moderate,
        _ if reason.is_front() => Severity::Warning,
        _ => Severity::Mild,
    };
    Err(DequeError::InvalidIterator { severity, reason })
}
