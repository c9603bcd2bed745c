//! Double-ended growable sequence with generation-tracked cursor invalidation.
//!
//! [`GenDeque`] offers indexed access and amortized O(1) insertion and
//! removal at both ends. Cursors into it never dangle: every cursor carries
//! a shared hold on the *generation* that was current when it was taken, and
//! any mutation that can shift or relocate elements retires that generation
//! with a reason. The next time the cursor is used it reports, through
//! [`DequeError::InvalidIterator`], why it went stale and how much that
//! matters.
//!
//! # Architecture
//!
//! ```text
//! GenDeque<T> (container)
//! ├── Buffer<T>            slots + occupied window [front, back)
//! │   └── Box<[Option<T>]> vacant = None, live = Some
//! ├── GenerationTracker
//! │   └── Rc<Generation>   current epoch, shared with every cursor
//! ├── BlockId              identity of the current slot block
//! └── DequeStats           reallocation / retirement counters
//!
//! Cursor<T> / ConstCursor<T>
//! └── RawCursor            position, captured window, BlockId, Rc<Generation>
//! ```
//!
//! # Invalidation severities
//!
//! | Retirement reason              | Cursor condition            | Severity   |
//! |--------------------------------|-----------------------------|------------|
//! | destroy                        | any                         | `Severe`   |
//! | copy-assign / move-assign      | any                         | `Moderate` |
//! | pop at either end              | points at the removed slot  | `Severe`   |
//! | push / pop / emplace           | outside the recorded window | `Moderate` |
//! | push / emplace that grew       | any                         | `Moderate` |
//! | push / pop at the front        | inside the recorded window  | `Warning`  |
//! | anything else                  |                             | `Mild`     |
//!
//! # Example
//!
//! ```
//! use gendeque::{gendeque, DequeError, Severity};
//!
//! let mut deque = gendeque![1, 2, 3];
//! let first = deque.cbegin();
//! assert_eq!(deque.get_at(&first), Ok(&1));
//!
//! deque.pop_front().unwrap();
//! assert!(matches!(
//!     deque.get_at(&first),
//!     Err(DequeError::InvalidIterator { severity: Severity::Severe, .. })
//! ));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod deque;
pub mod error;
pub mod generation;
pub mod id;
pub mod metrics;

// Public re-exports for the primary API surface.
pub use config::DequeConfig;
pub use cursor::{ConstCursor, Cursor, ReadCursor};
pub use deque::GenDeque;
pub use error::{DequeError, Severity};
pub use generation::{Reason, Retirement, Window};
pub use metrics::DequeStats;

/// Build a [`GenDeque`] from a literal list of elements.
///
/// The resulting container has capacity equal to its length (at least one).
///
/// ```
/// let deque = gendeque::gendeque![10, 20, 30];
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque.get(2), Ok(&30));
/// ```
#[macro_export]
macro_rules! gendeque {
    () => {
        $crate::GenDeque::new()
    };
    ($($elem:expr),+ $(,)?) => {
        $crate::GenDeque::from(::std::vec![$($elem),+])
    };
}
