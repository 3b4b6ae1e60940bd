//! Benchmarks comparing SkipMap against std's BTreeMap.
//!
//! Run with: cargo bench
//!
//! Keys are a fixed pseudo-random permutation so both maps see the same
//! insertion order.

use std::collections::BTreeMap;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_skipmap::SkipMap;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

const COUNT: usize = 10_000;

fn shuffled_keys() -> Vec<u64> {
    let mut keys: Vec<u64> = (0..COUNT as u64).collect();
    keys.shuffle(&mut SmallRng::seed_from_u64(42));
    keys
}

fn make_skipmap() -> SkipMap<u64, u64> {
    SkipMap::with_rng(16, SmallRng::seed_from_u64(12345))
}

// ============================================================================
// Insert
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(COUNT as u64));
    let keys = shuffled_keys();

    // Reuse via clear() so the arena keeps its capacity
    let mut skip = make_skipmap();
    group.bench_function("skipmap", |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(skip.insert(k, k).is_valid());
            }
            skip.clear();
        });
    });

    let mut btree = BTreeMap::new();
    group.bench_function("btreemap", |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(btree.insert(k, k));
            }
            btree.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Lookup
// ============================================================================

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(COUNT as u64));
    let keys = shuffled_keys();

    let mut skip = make_skipmap();
    skip.extend(keys.iter().map(|&k| (k, k)));
    group.bench_function("skipmap", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(skip.get(k));
            }
        });
    });

    let btree: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
    group.bench_function("btreemap", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(btree.get(k));
            }
        });
    });

    group.finish();
}

// ============================================================================
// Remove + reinsert churn
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    group.throughput(Throughput::Elements(COUNT as u64));
    let keys = shuffled_keys();

    let mut skip = make_skipmap();
    skip.extend(keys.iter().map(|&k| (k, k)));
    group.bench_function("skipmap", |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(skip.take(&k));
                skip.insert(k, k);
            }
        });
    });

    let mut btree: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
    group.bench_function("btreemap", |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(btree.remove(&k));
                btree.insert(k, k);
            }
        });
    });

    group.finish();
}

// ============================================================================
// Iteration
// ============================================================================

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    group.throughput(Throughput::Elements(COUNT as u64));
    let keys = shuffled_keys();

    let mut skip = make_skipmap();
    skip.extend(keys.iter().map(|&k| (k, k)));
    group.bench_function("skipmap", |b| {
        b.iter(|| black_box(skip.values().sum::<u64>()));
    });

    let btree: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
    group.bench_function("btreemap", |b| {
        b.iter(|| black_box(btree.values().sum::<u64>()));
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_get, bench_churn, bench_iter);
criterion_main!(benches);
