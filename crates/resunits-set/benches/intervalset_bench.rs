// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use resunits_set::{Interval, IntervalSet};
use std::{env, hint::black_box};

#[inline]
fn iv(a: u64, b: u64) -> Interval<u64> {
    Interval::new_unchecked(a, b)
}

#[derive(Clone, Copy)]
enum OpKind {
    Allocate,
    Release,
}

#[derive(Clone, Copy)]
struct Op {
    kind: OpKind,
    width: u64,
    pick: usize,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn gen_ops(n: usize, max_width: u64, rng: &mut impl Rng) -> Vec<Op> {
    (0..n)
        .map(|_| Op {
            kind: if rng.random_bool(0.55) {
                OpKind::Allocate
            } else {
                OpKind::Release
            },
            width: rng.random_range(1..=max_width),
            pick: rng.random_range(0..usize::MAX),
        })
        .collect()
}

/// Replays allocate/release decisions against a free pool. Allocation takes
/// a pseudo-random candidate window, release returns a pseudo-random
/// previously allocated interval.
fn churn(free: &mut IntervalSet<u64>, allocated: &mut Vec<Interval<u64>>, ops: &[Op]) {
    for &Op { kind, width, pick } in ops {
        match kind {
            OpKind::Allocate => {
                let Ok(windows) = free.candidate_windows(width) else {
                    continue;
                };
                let count = windows.clone().take(64).count();
                if count == 0 {
                    continue;
                }
                let picked = windows.take(64).nth(pick % count);
                if let Some(window) = picked {
                    if free.remove(window).is_ok() {
                        allocated.push(window);
                    }
                }
            }
            OpKind::Release => {
                if allocated.is_empty() {
                    continue;
                }
                let window = allocated.swap_remove(pick % allocated.len());
                let _ = free.insert(window);
            }
        }
    }
}

fn fragmented_pool(size: u64, ops: &[Op]) -> IntervalSet<u64> {
    let mut free = IntervalSet::new();
    let _ = free.insert(iv(0, size));
    let mut allocated = Vec::new();
    churn(&mut free, &mut allocated, ops);
    free
}

fn register_churn(c: &mut Criterion, size: u64, ops_n: usize, max_width: u64) {
    let mut group = c.benchmark_group("intervalset_churn");
    group.throughput(Throughput::Elements(ops_n as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(0xA11C_E5EE_D000);
    let ops = gen_ops(ops_n, max_width, &mut rng);

    group.bench_function(BenchmarkId::new("allocate_release", size), |b| {
        b.iter_batched(
            || {
                let mut free = IntervalSet::new();
                let _ = free.insert(iv(0, size));
                (free, Vec::with_capacity(ops.len()))
            },
            |(mut free, mut allocated)| {
                churn(&mut free, &mut allocated, &ops);
                black_box((free, allocated));
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn register_queries(c: &mut Criterion, size: u64, ops_n: usize, max_width: u64, queries_n: usize) {
    let mut group = c.benchmark_group("intervalset_queries");
    group.throughput(Throughput::Elements(queries_n as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(0xFEED_FACE_CAFE);
    let pool = fragmented_pool(size, &gen_ops(ops_n, max_width, &mut rng));
    let queries: Vec<_> = (0..queries_n)
        .map(|_| {
            let a = rng.random_range(0..size);
            let w = rng.random_range(1..=max_width.min(size - a));
            iv(a, a + w)
        })
        .collect();

    group.bench_function(BenchmarkId::new("includes", pool.len()), |b| {
        b.iter(|| {
            let hits = queries.iter().filter(|q| pool.includes(q)).count();
            black_box(hits)
        })
    });
    group.bench_function(BenchmarkId::new("candidate_windows", pool.len()), |b| {
        b.iter(|| {
            let mut count = 0usize;
            for width in 1..=max_width {
                if let Ok(windows) = pool.candidate_windows(width) {
                    count += windows.count();
                }
            }
            black_box(count)
        })
    });
    group.finish();
}

fn register_algebra(c: &mut Criterion, size: u64, ops_n: usize, max_width: u64) {
    let mut group = c.benchmark_group("intervalset_algebra");

    let mut rng = ChaCha8Rng::seed_from_u64(0xD00D_F00D);
    let a = fragmented_pool(size, &gen_ops(ops_n, max_width, &mut rng));
    let b = fragmented_pool(size, &gen_ops(ops_n, max_width, &mut rng));
    let common = a.intersection(&b);

    group.bench_function(BenchmarkId::new("intersection", a.len() + b.len()), |bench| {
        bench.iter(|| black_box(a.intersection(&b)))
    });
    group.bench_function(BenchmarkId::new("includes_set", common.len()), |bench| {
        bench.iter(|| black_box(a.includes_set(&common)))
    });
    group.bench_function(BenchmarkId::new("includes_set_by_search", common.len()), |bench| {
        bench.iter(|| black_box(a.includes_set_by_search(&common)))
    });
    group.finish();
}

fn intervalset_benches(c: &mut Criterion) {
    // Defaults (override with env)
    let size = env_or("POOL_SIZE", 65_536u64);
    let ops_n = env_or("POOL_OPS", 8_000usize);
    let max_width = env_or("POOL_MAX_WIDTH", 32u64);
    let queries_n = env_or("POOL_QUERIES", 10_000usize);

    register_churn(c, size, ops_n, max_width);
    register_queries(c, size, ops_n, max_width, queries_n);
    register_algebra(c, size, ops_n, max_width);
}

criterion_group!(benches, intervalset_benches);
criterion_main!(benches);
