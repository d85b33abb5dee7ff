//! Benchmarks for generation advance.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use toroidal_life::{
    compute::Grid,
    schema::{Pattern, Seed},
};

fn seeded_grid(size: usize) -> Grid {
    let mut grid = Grid::new(size, size).expect("non-zero grid");
    let seed = Seed::at(
        Pattern::Noise {
            density: 0.3,
            seed: 42,
        },
        (0, 0),
    );
    grid.apply_seed(&seed).expect("valid seed");
    grid
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for size in [64, 128, 256, 512] {
        let mut grid = seeded_grid(size);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    black_box(&mut grid).advance();
                });
            },
        );
    }

    group.finish();
}

fn bench_advance_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_parallel");

    for size in [64, 128, 256, 512] {
        let mut grid = seeded_grid(size);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    black_box(&mut grid).advance_parallel();
                });
            },
        );
    }

    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for size in [64, 256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, &size| {
                b.iter(|| Grid::new(black_box(size), black_box(size)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_advance_parallel, bench_construction);
criterion_main!(benches);
