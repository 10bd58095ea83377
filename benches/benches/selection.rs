// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use zonemap_selection::Selection;

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/toggle");

    // Selections are scanned linearly; these sizes cover a user clicking
    // through zones up to an unrealistically large select-everything.
    for len in [8usize, 64, 512] {
        let keys: Vec<u32> = (0..(len as u32)).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("toggle_on_off", len), &keys, |b, keys| {
            b.iter_batched(
                Selection::<u32>::new,
                |mut sel| {
                    for &k in keys {
                        sel.toggle(k);
                    }
                    for &k in keys.iter().rev() {
                        sel.toggle(k);
                    }
                    black_box(sel);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("pop_last", len), &keys, |b, keys| {
            b.iter_batched(
                || {
                    let mut sel = Selection::<u32>::new();
                    for &k in keys {
                        sel.add(k);
                    }
                    sel
                },
                |mut sel| {
                    while let Some(k) = sel.pop_last() {
                        black_box(k);
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_replace_with_hashed(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/replace_with_hashed");

    for len in [512usize, 8_192] {
        // Every key appears twice, as when merging two overlapping query results.
        let keys: Vec<u32> = (0..(len as u32)).chain(0..(len as u32)).collect();
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("duplicated", len), &keys, |b, keys| {
            b.iter_batched(
                Selection::<u32>::new,
                |mut sel| {
                    sel.replace_with_hashed(keys.iter().copied());
                    black_box(sel);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_toggle, bench_replace_with_hashed);
criterion_main!(benches);
