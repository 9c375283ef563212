#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for the midpoint rasterizer and software fills.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use penguin_gfx::prelude::*;
use penguin_gfx::render::raster;

fn circle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle_outline");

    for radius in [8, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &radius| {
            b.iter(|| raster::rasterize_circle_outline(black_box(Vector2::new(512.0, 512.0)), radius));
        });
    }

    group.finish();
}

fn ellipse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ellipse_filled");

    for (rx, ry) in [(16, 8), (128, 32), (512, 256)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rx}x{ry}")),
            &(rx, ry),
            |b, &(rx, ry)| {
                b.iter(|| {
                    let mut pixels = 0u64;
                    raster::ellipse_filled::<std::convert::Infallible, _>(
                        black_box(Vector2::ZERO),
                        rx,
                        ry,
                        |span| {
                            pixels += u64::from(span.len());
                            Ok(())
                        },
                    )
                    .unwrap();
                    pixels
                });
            },
        );
    }

    group.finish();
}

fn software_fill_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("software_filled_circle");

    for radius in [16.0f32, 128.0, 380.0] {
        let mut renderer =
            Renderer::new(SoftwareBackend::new(800, 800).expect("backend should be created"));
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &radius| {
            b.iter(|| {
                renderer
                    .draw_circle(
                        Circle2::new(Vector2::new(400.0, 400.0), black_box(radius)),
                        Colour::RED,
                        DrawMode::Filled,
                    )
                    .expect("software draws should succeed");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, circle_benchmark, ellipse_benchmark, software_fill_benchmark);
criterion_main!(benches);
