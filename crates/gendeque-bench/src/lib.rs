//! Benchmark workloads for the gendeque container.
//!
//! Provides deterministic operation mixes for benchmarking:
//!
//! - [`mixed_workload`]: seeded sequence of pushes and pops at both ends
//! - [`apply`]: replay a workload against a [`GenDeque`]
//! - [`steady_queue`]: container pre-filled to a fixed length for FIFO churn

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gendeque::GenDeque;

/// One end-mutation in a benchmark workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    PushBack(u64),
    PushFront(u64),
    PopBack,
    PopFront,
}

/// Generate `n` deterministic operations from `seed`.
///
/// Pushes outnumber pops three to one, so the container grows over the
/// run and exercises reallocation at both ends.
pub fn mixed_workload(n: usize, seed: u64) -> Vec<Op> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            // LCG step; the high bits are the well-mixed ones.
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let roll = state >> 61;
            match roll {
                0..=2 => Op::PushBack(state),
                3..=5 => Op::PushFront(state),
                6 => Op::PopBack,
                _ => Op::PopFront,
            }
        })
        .collect()
}

/// Replay `ops` against `deque`. Pops on an empty container are skipped.
///
/// Returns the sum of popped values so the work cannot be optimised out.
pub fn apply(deque: &mut GenDeque<u64>, ops: &[Op]) -> u64 {
    let mut sum = 0u64;
    for op in ops {
        match *op {
            Op::PushBack(v) => deque.push_back(v),
            Op::PushFront(v) => deque.push_front(v),
            Op::PopBack => sum = sum.wrapping_add(deque.pop_back().unwrap_or(0)),
            Op::PopFront => sum = sum.wrapping_add(deque.pop_front().unwrap_or(0)),
        }
    }
    sum
}

/// A container holding `0..len` with capacity exactly `len`.
pub fn steady_queue(len: usize) -> GenDeque<u64> {
    (0..len as u64).collect()
}
