//! Criterion microbenches for roimap hot paths.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - select-tool hit testing over a busy annotation set
//! - projecting annotations onto per-camera images and formatting the manifest
//! - project JSON parsing

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use roimap::export::{manifest, project_annotations, CameraImageMapping};
use roimap::geom::{is_near_shape, Point, NEAR_THRESHOLD};
use roimap::images::TargetImage;
use roimap::layout::layout;
use roimap::model::{RoiShape, Square};
use roimap::project::io_json::{from_json_str, to_json_string};
use roimap::project::Project;

/// A deterministic mix of lines, polygons and squares spread over a
/// 1280x720 mosaic.
fn busy_shapes(n: usize) -> Vec<RoiShape> {
    (0..n)
        .map(|i| {
            let x = (i * 37 % 1200) as f64;
            let y = (i * 53 % 680) as f64;
            match i % 3 {
                0 => RoiShape::line(Point::new(x, y), Point::new(x + 40.0, y + 25.0), "#ff0000"),
                1 => RoiShape::polygon(
                    vec![
                        Point::new(x, y),
                        Point::new(x + 30.0, y),
                        Point::new(x + 45.0, y + 20.0),
                        Point::new(x + 10.0, y + 35.0),
                    ],
                    "#00ff00",
                ),
                _ => RoiShape::Square(Square::new(x, y, 50.0, "#0000ff")),
            }
        })
        .collect()
}

/// Benchmark a topmost-first pick over 300 shapes that misses everything.
fn bench_hit_test(c: &mut Criterion) {
    let shapes = busy_shapes(300);
    let probe = Point::new(1279.0, 719.0);

    let mut group = c.benchmark_group("hit_test");
    group.throughput(Throughput::Elements(shapes.len() as u64));

    group.bench_function("is_near_shape_scan", |b| {
        b.iter(|| {
            let hit = shapes
                .iter()
                .rposition(|s| is_near_shape(black_box(&probe), s, NEAR_THRESHOLD));
            black_box(hit)
        })
    });

    group.finish();
}

/// Benchmark projection plus manifest formatting for six cameras.
fn bench_export_manifest(c: &mut Criterion) {
    let shapes = busy_shapes(300);
    let tiles = layout(6, 1280.0, 720.0);
    let images = (1..=6)
        .map(|i| TargetImage::with_size(format!("cam{i}.png"), 1920, 1080))
        .collect();
    let mapping = CameraImageMapping::in_order(images, tiles.len()).expect("mapping");

    let mut group = c.benchmark_group("export");
    group.throughput(Throughput::Elements(shapes.len() as u64));

    group.bench_function("project_and_format", |b| {
        b.iter(|| {
            let exports = project_annotations(black_box(&shapes), &tiles, &mapping);
            black_box(manifest::manifest(&exports))
        })
    });

    group.finish();
}

/// Benchmark project JSON parsing.
fn bench_project_parse(c: &mut Criterion) {
    let project = Project {
        rois: busy_shapes(300),
        ..Project::default()
    };
    let json = to_json_string(&project).expect("serialize fixture");

    let mut group = c.benchmark_group("project_parse");
    group.throughput(Throughput::Bytes(json.len() as u64));

    group.bench_function("from_json_str", |b| {
        b.iter(|| {
            let parsed = from_json_str(black_box(&json)).unwrap();
            black_box(parsed)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_hit_test,
    bench_export_manifest,
    bench_project_parse,
);
criterion_main!(benches);
