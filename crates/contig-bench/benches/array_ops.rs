//! Criterion micro-benchmarks for append, insert, erase and clone,
//! measured against `std::vec::Vec` as a baseline.

use std::hint::black_box;

use contig_array::{Bitwise, Duplicate, DynamicArray};
use contig_bench::{filled, payload_strings, scatter_positions};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

const N: usize = 10_000;

/// Append N integers to an empty container.
fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back_10k");
    group.bench_function("dynamic_array", |b| {
        b.iter(|| {
            let mut arr = DynamicArray::new();
            for v in 0..N as u64 {
                arr.push_back(v);
            }
            black_box(arr)
        });
    });
    group.bench_function("dynamic_array_duplicate", |b| {
        b.iter(|| black_box(filled(N, Duplicate)));
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for x in 0..N as u64 {
                v.push(x);
            }
            black_box(v)
        });
    });
    group.finish();
}

/// Append owned strings; growth relocates heap-owning elements.
fn bench_push_strings(c: &mut Criterion) {
    let strings = payload_strings(1_000);
    let mut group = c.benchmark_group("push_strings_1k");
    group.bench_function("bitwise", |b| {
        b.iter_batched(
            || strings.clone(),
            |input| {
                let mut arr = DynamicArray::new_in(Bitwise);
                arr.extend(input);
                black_box(arr)
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("duplicate", |b| {
        b.iter_batched(
            || strings.clone(),
            |input| {
                let mut arr = DynamicArray::new_in(Duplicate);
                arr.extend(input);
                black_box(arr)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

/// 1 000 inserts at scattered positions into a 1 000-element array.
fn bench_insert(c: &mut Criterion) {
    let positions = scatter_positions(1_000, 1_000, 42);
    let mut group = c.benchmark_group("insert_scattered_1k");
    group.bench_function("dynamic_array", |b| {
        b.iter_batched(
            || filled(1_000, Bitwise),
            |mut arr| {
                for &pos in &positions {
                    arr.insert(pos, 0);
                }
                black_box(arr)
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("vec", |b| {
        b.iter_batched(
            || (0..1_000u64).collect::<Vec<u64>>(),
            |mut v| {
                for &pos in &positions {
                    v.insert(pos, 0);
                }
                black_box(v)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

/// Erase from the front until empty, the worst case for shifting.
fn bench_erase_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_front_2k");
    group.bench_function("dynamic_array", |b| {
        b.iter_batched(
            || filled(2_000, Bitwise),
            |mut arr| {
                while !arr.is_empty() {
                    black_box(arr.erase(0));
                }
                arr
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("vec", |b| {
        b.iter_batched(
            || (0..2_000u64).collect::<Vec<u64>>(),
            |mut v| {
                while !v.is_empty() {
                    black_box(v.remove(0));
                }
                v
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

/// Deep copy of a populated array, fresh and into reused storage.
fn bench_clone(c: &mut Criterion) {
    let ints = filled(N, Bitwise);
    let strings: DynamicArray<String> = payload_strings(N).into_iter().collect();
    let mut group = c.benchmark_group("clone_10k");
    group.bench_function("u64", |b| b.iter(|| black_box(ints.clone())));
    group.bench_function("string", |b| b.iter(|| black_box(strings.clone())));
    group.bench_function("clone_from_reuse", |b| {
        let mut dst = ints.clone();
        b.iter(|| {
            dst.clone_from(black_box(&ints));
            black_box(dst.len())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_strings,
    bench_insert,
    bench_erase_front,
    bench_clone
);
criterion_main!(benches);
