//! Criterion micro-benchmarks for end-mutations and indexed access.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gendeque::GenDeque;
use gendeque_bench::{apply, mixed_workload, steady_queue};

/// Benchmark: 10K pushes at the back from the default capacity.
fn bench_push_back_10k(c: &mut Criterion) {
    c.bench_function("push_back_10k", |b| {
        b.iter(|| {
            let mut deque = GenDeque::new();
            for i in 0..10_000u64 {
                deque.push_back(i);
            }
            black_box(deque.len());
        });
    });
}

/// Benchmark: 10K pushes at the front from the default capacity.
fn bench_push_front_10k(c: &mut Criterion) {
    c.bench_function("push_front_10k", |b| {
        b.iter(|| {
            let mut deque = GenDeque::new();
            for i in 0..10_000u64 {
                deque.push_front(i);
            }
            black_box(deque.len());
        });
    });
}

/// Benchmark: seeded mix of 10K pushes and pops at both ends.
fn bench_mixed_10k(c: &mut Criterion) {
    let ops = mixed_workload(10_000, 42);

    c.bench_function("mixed_10k", |b| {
        b.iter(|| {
            let mut deque = GenDeque::new();
            black_box(apply(&mut deque, &ops));
        });
    });
}

/// Benchmark: index every element of a 10K container.
fn bench_index_10k(c: &mut Criterion) {
    let deque = steady_queue(10_000);

    c.bench_function("index_10k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for k in 0..deque.len() {
                sum = sum.wrapping_add(*deque.get(k).unwrap());
            }
            black_box(sum);
        });
    });
}

criterion_group!(
    benches,
    bench_push_back_10k,
    bench_push_front_10k,
    bench_mixed_10k,
    bench_index_10k
);
criterion_main!(benches);
