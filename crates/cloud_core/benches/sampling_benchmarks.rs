//! Criterion benchmarks for the volume samplers and normal estimation.
//!
//! Measures throughput per shape across batch sizes to characterise scaling
//! of the closed-form samplers against the rejection sampler.

use cloud_core::normals::estimate_normals;
use cloud_core::rng::CloudRng;
use cloud_core::sampling::generate;
use cloud_core::shape::{Ball, Cube, CubeWithHole, HoleAxis, ShapeParams};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn shapes() -> Vec<ShapeParams> {
    vec![
        ShapeParams::Ball(Ball::new(10.0).unwrap()),
        ShapeParams::Cube(Cube::new(10.0).unwrap()),
        ShapeParams::CubeWithHole(CubeWithHole::new(10.0, 1.0, HoleAxis::Z).unwrap()),
    ]
}

/// Benchmark point generation per shape.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for params in shapes() {
        for size in [10_000usize, 100_000] {
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                BenchmarkId::new(params.kind().as_str(), size),
                &size,
                |b, &size| {
                    b.iter(|| {
                        let mut rng = CloudRng::from_seed(42);
                        black_box(generate(size, &params, &mut rng).unwrap())
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark normal estimation on pre-generated batches.
fn bench_normals(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_normals");
    let size = 100_000usize;

    for params in shapes() {
        let points = generate(size, &params, &mut CloudRng::from_seed(7)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(params.kind().as_str(), |b| {
            b.iter(|| black_box(estimate_normals(&points, &params).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_normals);
criterion_main!(benches);
