//! Criterion micro-benchmarks for cursor traversal and generation churn.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gendeque_bench::steady_queue;
use gendeque_test_utils::fixtures::cursors_over;

/// Benchmark: walk a 10K container begin to end through a cursor.
fn bench_cursor_walk_10k(c: &mut Criterion) {
    let deque = steady_queue(10_000);

    c.bench_function("cursor_walk_10k", |b| {
        b.iter(|| {
            let mut it = deque.cbegin();
            let end = deque.cend();
            let mut sum = 0u64;
            while it.try_ne(&end).unwrap() {
                sum = sum.wrapping_add(*deque.get_at(&it).unwrap());
                it.move_next().unwrap();
            }
            black_box(sum);
        });
    });
}

/// Benchmark: push/pop churn with no cursors held (in-place bumps).
fn bench_churn_unheld(c: &mut Criterion) {
    let mut deque = steady_queue(1024);

    c.bench_function("churn_unheld", |b| {
        b.iter(|| {
            deque.push_back(1);
            black_box(deque.pop_back().unwrap());
        });
    });
}

/// Benchmark: push/pop churn while a cursor holds each generation, so every
/// mutation retires one.
fn bench_churn_held(c: &mut Criterion) {
    let mut deque = steady_queue(1024);

    c.bench_function("churn_held", |b| {
        b.iter(|| {
            let held = deque.cbegin();
            deque.push_back(1);
            black_box(deque.pop_back().unwrap());
            black_box(held.check().is_err());
        });
    });
}

/// Benchmark: validate 1K stale cursors after a single front push.
fn bench_stale_check_1k(c: &mut Criterion) {
    let mut deque = steady_queue(1024);
    let cursors = cursors_over(&deque);
    deque.push_front(0);

    c.bench_function("stale_check_1k", |b| {
        b.iter(|| {
            let failures = cursors.iter().filter(|c| deque.get_at(*c).is_err()).count();
            black_box(failures);
        });
    });
}

criterion_group!(
    benches,
    bench_cursor_walk_10k,
    bench_churn_unheld,
    bench_churn_held,
    bench_stale_check_1k
);
criterion_main!(benches);
