//! Generation-tagged cursors.
//!
//! A cursor is a position in a container's slot block plus a shared hold
//! on the generation that was current when the cursor was taken. It does
//! not borrow the container, so it can outlive mutations and even the
//! container itself; misuse is reported as a [`DequeError`] instead of
//! undefined behaviour.
//!
//! [`Cursor`] can read and write through [`GenDeque::get_at_mut`].
//! [`ConstCursor`] can only read. Both share [`RawCursor`] and the same
//! validity checks. A `Cursor` narrows into a `ConstCursor` with
//! [`From`] or [`Cursor::as_const`].

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::deque::GenDeque;
use crate::error::{DequeError, Severity};
use crate::generation::{check_liveness, Generation, Retirement, Window};
use crate::id::BlockId;

/// Position state shared by both cursor kinds.
///
/// Holding a `RawCursor` keeps its generation record alive.
#[derive(Clone)]
pub struct RawCursor {
    /// Slot position in the block the cursor was taken in.
    pos: isize,
    /// Occupied window when the cursor was taken.
    bounds: Window,
    /// Block the cursor was taken in.
    block: BlockId,
    /// Generation current when the cursor was taken.
    generation: Rc<Generation>,
}

impl RawCursor {
    pub(crate) fn new(pos: isize, bounds: Window, block: BlockId, generation: Rc<Generation>) -> Self {
        Self {
            pos,
            bounds,
            block,
            generation,
        }
    }

    pub(crate) fn pos(&self) -> isize {
        self.pos
    }

    pub(crate) fn block(&self) -> BlockId {
        self.block
    }

    pub(crate) fn generation(&self) -> &Rc<Generation> {
        &self.generation
    }

    fn check(&self) -> Result<(), DequeError> {
        check_liveness(&self.generation, self.pos)
    }

    /// Validity check run before every dereference.
    ///
    /// A severe liveness failure always wins. Otherwise a position outside
    /// the captured window reports `OutOfRange` ahead of milder staleness.
    pub(crate) fn check_dereference(&self) -> Result<(), DequeError> {
        let out_of_range = !self.bounds.contains(self.pos);
        if let Err(err) = self.check() {
            if !out_of_range || err.severity() == Some(Severity::Severe) {
                return Err(err);
            }
        }
        if out_of_range {
            return Err(DequeError::OutOfRange {
                index: self.pos - self.bounds.begin,
                len: self.bounds.len(),
            });
        }
        Ok(())
    }

    /// Error for a move that would leave the representable positions.
    ///
    /// `index` saturates at `isize::MAX`.
    fn unreachable(&self) -> DequeError {
        DequeError::OutOfRange {
            index: isize::MAX,
            len: self.bounds.len(),
        }
    }

    fn step(&mut self, delta: isize) -> Result<(), DequeError> {
        self.check()?;
        self.pos = self.pos.checked_add(delta).ok_or_else(|| self.unreachable())?;
        Ok(())
    }

    fn try_eq(&self, other: &RawCursor) -> Result<bool, DequeError> {
        self.check()?;
        Ok(self.pos == other.pos && self.block == other.block)
    }

    fn distance(&self, other: &RawCursor) -> Result<isize, DequeError> {
        self.check()?;
        if self.block != other.block {
            return Err(DequeError::ForeignCursor);
        }
        self.pos
            .checked_sub(other.pos)
            .ok_or_else(|| self.unreachable())
    }

    fn offset(&self, n: usize) -> Result<RawCursor, DequeError> {
        self.check()?;
        let pos = isize::try_from(n)
            .ok()
            .and_then(|n| self.pos.checked_add(n))
            .ok_or_else(|| self.unreachable())?;
        let mut moved = self.clone();
        moved.pos = pos;
        Ok(moved)
    }
}

impl fmt::Debug for RawCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawCursor")
            .field("pos", &self.pos)
            .field("bounds", &self.bounds)
            .field("block", &self.block)
            .field("version", &self.generation.version())
            .field("retired", &self.generation.is_retired())
            .finish()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Cursors that can be dereferenced for reading.
///
/// Implemented by [`Cursor`] and [`ConstCursor`]; sealed.
pub trait ReadCursor<T>: sealed::Sealed {
    /// The shared position state.
    fn raw(&self) -> &RawCursor;
}

macro_rules! cursor_common {
    ($name:ident) => {
        impl<T> $name<T> {
            pub(crate) fn from_raw(raw: RawCursor) -> Self {
                Self {
                    raw,
                    _marker: PhantomData,
                }
            }

            /// Pre-increment: step one slot towards the back.
            pub fn move_next(&mut self) -> Result<&mut Self, DequeError> {
                self.raw.step(1)?;
                Ok(self)
            }

            /// Pre-decrement: step one slot towards the front.
            pub fn move_prev(&mut self) -> Result<&mut Self, DequeError> {
                self.raw.step(-1)?;
                Ok(self)
            }

            /// Whether both cursors point at the same slot of the same block.
            ///
            /// Only `self` is checked for liveness.
            pub fn try_eq<C: ReadCursor<T>>(&self, other: &C) -> Result<bool, DequeError> {
                self.raw.try_eq(other.raw())
            }

            /// Negation of [`try_eq`](Self::try_eq).
            pub fn try_ne<C: ReadCursor<T>>(&self, other: &C) -> Result<bool, DequeError> {
                self.try_eq(other).map(|eq| !eq)
            }

            /// Signed number of slots from `other` to `self`.
            pub fn distance<C: ReadCursor<T>>(&self, other: &C) -> Result<isize, DequeError> {
                self.raw.distance(other.raw())
            }

            /// A read-only cursor `n` slots further towards the back.
            ///
            /// Fails with [`DequeError::OutOfRange`] when the target position
            /// is not representable.
            pub fn offset(&self, n: usize) -> Result<ConstCursor<T>, DequeError> {
                self.raw.offset(n).map(ConstCursor::from_raw)
            }

            /// Liveness probe: `Ok` while the cursor's generation is live.
            pub fn check(&self) -> Result<(), DequeError> {
                self.raw.check()
            }

            /// Logical offset from the front of the window captured when the
            /// cursor was taken.
            pub fn index(&self) -> isize {
                self.raw.pos - self.raw.bounds.begin
            }

            /// Version of the cursor's generation record.
            pub fn version(&self) -> u64 {
                self.raw.generation.version()
            }

            /// Why the cursor's generation was retired, if it was.
            pub fn retirement(&self) -> Option<Retirement> {
                self.raw.generation.retirement()
            }

            /// Whether the cursor's generation has been retired.
            pub fn is_retired(&self) -> bool {
                self.raw.generation.is_retired()
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self::from_raw(self.raw.clone())
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.raw).finish()
            }
        }

        impl<T> sealed::Sealed for $name<T> {}

        impl<T> ReadCursor<T> for $name<T> {
            fn raw(&self) -> &RawCursor {
                &self.raw
            }
        }
    };
}

/// A read-write cursor.
pub struct Cursor<T> {
    raw: RawCursor,
    _marker: PhantomData<fn() -> T>,
}

/// A read-only cursor.
pub struct ConstCursor<T> {
    raw: RawCursor,
    _marker: PhantomData<fn() -> T>,
}

cursor_common!(Cursor);
cursor_common!(ConstCursor);

impl<T> Cursor<T> {
    /// A read-only copy of this cursor, sharing its generation.
    pub fn as_const(&self) -> ConstCursor<T> {
        ConstCursor::from_raw(self.raw.clone())
    }

    /// Dereference for reading. Same as [`GenDeque::get_at`].
    pub fn read<'a>(&self, deque: &'a GenDeque<T>) -> Result<&'a T, DequeError> {
        deque.get_at(self)
    }

    /// Dereference for writing. Same as [`GenDeque::get_at_mut`].
    pub fn write<'a>(&self, deque: &'a mut GenDeque<T>) -> Result<&'a mut T, DequeError> {
        deque.get_at_mut(self)
    }
}

impl<T> ConstCursor<T> {
    /// Dereference for reading. Same as [`GenDeque::get_at`].
    pub fn read<'a>(&self, deque: &'a GenDeque<T>) -> Result<&'a T, DequeError> {
        deque.get_at(self)
    }
}

impl<T> From<Cursor<T>> for ConstCursor<T> {
    fn from(cursor: Cursor<T>) -> Self {
        ConstCursor::from_raw(cursor.raw)
    }
}
