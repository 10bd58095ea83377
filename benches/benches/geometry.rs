// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use zonemap_geometry::{
    Geometry, LngLat, count_vertices, distance_km, path_length_km, polygon_from_center_radius,
};

fn bench_circle(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/circle");
    let center = LngLat::new(-117.16, 32.72);

    for segments in [16usize, 64, 256, 1_024] {
        group.throughput(Throughput::Elements(segments as u64));
        group.bench_with_input(
            BenchmarkId::new("polygon_from_center_radius", segments),
            &segments,
            |b, &segments| {
                b.iter(|| {
                    polygon_from_center_radius(black_box(center), black_box(1_500.0), segments)
                });
            },
        );
    }

    group.finish();
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/distance");
    let a = LngLat::new(-117.16, 32.72);
    let b = LngLat::new(-118.24, 34.05);
    group.bench_function("distance_km", |bench| {
        bench.iter(|| distance_km(black_box(a), black_box(b)));
    });

    let path: Vec<LngLat> = (0..1_000)
        .map(|i| LngLat::new(-117.0 + f64::from(i) * 0.001, 32.0 + f64::from(i % 7) * 0.001))
        .collect();
    group.throughput(Throughput::Elements(path.len() as u64));
    group.bench_function("path_length_km/1000", |bench| {
        bench.iter(|| path_length_km(black_box(&path)));
    });

    group.finish();
}

fn bench_contains_and_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/polygon");
    let center = LngLat::new(-117.16, 32.72);

    for segments in [64usize, 1_024] {
        let mut geometry = Geometry::polygon(polygon_from_center_radius(center, 5_000.0, segments));
        geometry.insert_hole(polygon_from_center_radius(center, 1_000.0, segments));

        group.bench_with_input(
            BenchmarkId::new("contains_inside", segments),
            &geometry,
            |b, geometry| {
                b.iter(|| geometry.contains(black_box(LngLat::new(-117.13, 32.72))));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("contains_in_hole", segments),
            &geometry,
            |b, geometry| {
                b.iter(|| geometry.contains(black_box(center)));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("count_vertices", segments),
            &geometry,
            |b, geometry| {
                b.iter(|| count_vertices(black_box(geometry)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_circle, bench_distance, bench_contains_and_count);
criterion_main!(benches);
