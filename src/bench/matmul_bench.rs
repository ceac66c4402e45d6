//! Criterion benchmarks comparing the three algorithms and both execution modes.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use recmatmul::{Algorithm, Matrix, RecursiveConfig, multiply};
use std::hint::black_box;

fn inputs(n: usize) -> (Matrix, Matrix) {
    let a = Matrix::from_fn(n, n, |r, c| ((r * n + c) % 100) as i64);
    let b = Matrix::from_fn(n, n, |r, c| ((r * 7 + c * 3) % 100) as i64);
    (a, b)
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    group.sample_size(10);

    for n in [128, 256, 512] {
        let (a, b) = inputs(n);
        group.throughput(Throughput::Elements((2 * n * n * n) as u64));

        group.bench_with_input(BenchmarkId::new("iterative", n), &n, |bench, _| {
            bench.iter(|| {
                multiply(
                    black_box(&a),
                    black_box(&b),
                    Algorithm::Iterative,
                    &RecursiveConfig::default(),
                )
                .unwrap()
            })
        });

        for algorithm in [Algorithm::DivideConquer, Algorithm::Strassen] {
            for config in [
                RecursiveConfig::sequential().with_threshold(64),
                RecursiveConfig::parallel()
                    .with_threshold(64)
                    .with_parallel_threshold(64),
            ] {
                let mode = if config.parallel { "par" } else { "seq" };
                let id = BenchmarkId::new(format!("{algorithm}-{mode}"), n);
                group.bench_with_input(id, &n, |bench, _| {
                    bench.iter(|| {
                        multiply(black_box(&a), black_box(&b), algorithm, &config).unwrap()
                    })
                });
            }
        }
    }

    group.finish();
}

fn bench_thresholds(c: &mut Criterion) {
    let mut group = c.benchmark_group("strassen_threshold");
    group.sample_size(10);

    let n = 512;
    let (a, b) = inputs(n);
    for threshold in [16, 32, 64, 128, 256] {
        let config = RecursiveConfig::parallel().with_threshold(threshold);
        let id = BenchmarkId::from_parameter(threshold);
        group.bench_with_input(id, &threshold, |bench, _| {
            bench.iter(|| {
                multiply(black_box(&a), black_box(&b), Algorithm::Strassen, &config).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_algorithms, bench_thresholds);
criterion_main!(benches);
