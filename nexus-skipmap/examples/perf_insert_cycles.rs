//! Cycle-accurate insert and lookup latency using rdtscp.
//!
//! Compares SkipMap against BTreeMap with per-operation cycle counts, and
//! SkipMap at level ratio 2 vs 4.
//!
//! Run with:
//!   cargo build --release --example perf_insert_cycles
//!   taskset -c 0 ./target/release/examples/perf_insert_cycles

use std::collections::BTreeMap;
use std::hint::black_box;

use hdrhistogram::Histogram;
use nexus_skipmap::SkipMap;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

const COUNT: usize = 100_000;

#[inline(always)]
fn rdtscp() -> u64 {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        let mut aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut aux)
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        panic!("rdtscp only supported on x86_64");
    }
}

fn print_stats(name: &str, hist: &Histogram<u64>) {
    println!("{}", name);
    println!("  min:  {:>6} cycles", hist.min());
    println!("  p50:  {:>6} cycles", hist.value_at_quantile(0.50));
    println!("  p99:  {:>6} cycles", hist.value_at_quantile(0.99));
    println!("  p999: {:>6} cycles", hist.value_at_quantile(0.999));
    println!("  max:  {:>6} cycles", hist.max());
    println!("  avg:  {:>6.0} cycles", hist.mean());
}

fn shuffled_keys() -> Vec<u64> {
    let mut keys: Vec<u64> = (0..COUNT as u64).collect();
    keys.shuffle(&mut SmallRng::seed_from_u64(42));
    keys
}

fn bench_skipmap(keys: &[u64], ratio: u32) -> (Histogram<u64>, Histogram<u64>) {
    let mut map = SkipMap::with_level_ratio(20, SmallRng::seed_from_u64(12345), ratio);
    let mut insert = Histogram::<u64>::new(3).unwrap();
    let mut get = Histogram::<u64>::new(3).unwrap();

    // Warmup - fill and clear to prime the arena
    for &k in &keys[..COUNT / 10] {
        black_box(map.insert(k, k).is_valid());
    }
    map.clear();

    for &k in keys {
        let start = rdtscp();
        black_box(map.insert(k, k).is_valid());
        let end = rdtscp();
        let _ = insert.record(end.wrapping_sub(start));
    }

    for k in keys {
        let start = rdtscp();
        black_box(map.get(k));
        let end = rdtscp();
        let _ = get.record(end.wrapping_sub(start));
    }

    (insert, get)
}

fn bench_btree(keys: &[u64]) -> (Histogram<u64>, Histogram<u64>) {
    let mut map = BTreeMap::new();
    let mut insert = Histogram::<u64>::new(3).unwrap();
    let mut get = Histogram::<u64>::new(3).unwrap();

    for &k in &keys[..COUNT / 10] {
        black_box(map.insert(k, k));
    }
    map.clear();

    for &k in keys {
        let start = rdtscp();
        black_box(map.insert(k, k));
        let end = rdtscp();
        let _ = insert.record(end.wrapping_sub(start));
    }

    for k in keys {
        let start = rdtscp();
        black_box(map.get(k));
        let end = rdtscp();
        let _ = get.record(end.wrapping_sub(start));
    }

    (insert, get)
}

fn main() {
    println!("INSERT / GET latency comparison ({} ops)", COUNT);
    println!("========================================");
    println!();

    let keys = shuffled_keys();
    let (skip2_insert, skip2_get) = bench_skipmap(&keys, 2);
    let (skip4_insert, skip4_get) = bench_skipmap(&keys, 4);
    let (btree_insert, btree_get) = bench_btree(&keys);

    print_stats("skipmap (ratio 2) insert:", &skip2_insert);
    println!();
    print_stats("skipmap (ratio 4) insert:", &skip4_insert);
    println!();
    print_stats("btreemap insert:", &btree_insert);
    println!();
    print_stats("skipmap (ratio 2) get:", &skip2_get);
    println!();
    print_stats("skipmap (ratio 4) get:", &skip4_get);
    println!();
    print_stats("btreemap get:", &btree_get);
    println!();

    let skip_p50 = skip2_get.value_at_quantile(0.50);
    let btree_p50 = btree_get.value_at_quantile(0.50);

    println!("----------------------------------------");
    if skip_p50 < btree_p50 {
        println!(
            "skipmap get p50 is {:.1}% FASTER",
            (1.0 - skip_p50 as f64 / btree_p50 as f64) * 100.0
        );
    } else if skip_p50 > btree_p50 {
        println!(
            "skipmap get p50 is {:.1}% SLOWER",
            (skip_p50 as f64 / btree_p50 as f64 - 1.0) * 100.0
        );
    } else {
        println!("skipmap get p50 is EQUAL");
    }
}
