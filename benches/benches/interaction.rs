// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use zonemap_geometry::{Geometry, LngLat};
use zonemap_interaction::{Controller, InteractionConfig, Mode};
use zonemap_overlay::{Properties, RecordingSurface, SourceData, SourceFeature};

fn zone_grid(n: u32) -> SourceData {
    let mut features = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let (x0, y0) = (f64::from(x), f64::from(y));
            let mut properties = Properties::new();
            properties.insert("zone_id".into(), format!("Z{x}-{y}").into());
            features.push(SourceFeature {
                geometry: Geometry::polygon(vec![
                    LngLat::new(x0, y0),
                    LngLat::new(x0 + 1.0, y0),
                    LngLat::new(x0 + 1.0, y0 + 1.0),
                    LngLat::new(x0, y0 + 1.0),
                    LngLat::new(x0, y0),
                ]),
                properties,
            });
        }
    }
    SourceData { features }
}

fn bench_select_zones(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction/select_zones");

    for n in [4u32, 16] {
        let zones = zone_grid(n);
        group.bench_with_input(BenchmarkId::new("click_all", n * n), &zones, |b, zones| {
            b.iter_batched(
                || {
                    let surface = RecordingSurface::new().with_fill_layer(
                        "evacuation-zones",
                        "evacuation-zones-fill",
                        zones.clone(),
                    );
                    Controller::new(surface, InteractionConfig::default())
                },
                |mut map| {
                    for y in 0..n {
                        for x in 0..n {
                            let p = LngLat::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                            let _ = map.click(p);
                        }
                    }
                    black_box(map.selected_zones().count());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_draw_and_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction/draw");

    group.bench_function("draw_polygon_commit_undo", |b| {
        b.iter_batched(
            || Controller::new(RecordingSurface::new(), InteractionConfig::default()),
            |mut map| {
                let _ = map.set_mode(Mode::DrawPolygon);
                for i in 0..12 {
                    let theta = f64::from(i) * core::f64::consts::TAU / 12.0;
                    let _ = map.click(LngLat::new(theta.cos(), theta.sin()));
                }
                let _ = map.double_click();
                let _ = map.undo();
                black_box(map.history().len());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("draw_circle", |b| {
        b.iter_batched(
            || Controller::new(RecordingSurface::new(), InteractionConfig::default()),
            |mut map| {
                let _ = map.set_mode(Mode::DrawCircle);
                let _ = map.click(LngLat::new(-117.0, 32.0));
                let _ = map.click(LngLat::new(-117.0, 32.01));
                black_box(map.state().shapes().len());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_select_zones, bench_draw_and_undo);
criterion_main!(benches);
