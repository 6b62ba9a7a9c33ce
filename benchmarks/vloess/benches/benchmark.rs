//! Batch LOESS evaluation benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (training size and query count)
//! - Algorithm parameters (span, iterations, chunk size)
//! - Kernels and polynomial degrees
//! - Pathological cases (outliers, clustered data, high noise)
//! - Bootstrap resampling, sequential and parallel
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::hint::black_box;
use vloess::prelude::*;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate smooth sinusoidal data with Gaussian noise.
fn generate_sine_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.2).unwrap();

    let x: Vec<f64> = (0..size).map(|i| i as f64 * 10.0 / size as f64).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| xi.sin() + noise_dist.sample(&mut rng))
        .collect();
    (x, y)
}

/// Generate data with outliers (5% of points are extreme).
fn generate_outlier_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.2).unwrap();
    let outlier_dist = Uniform::new(-5.0, 5.0).unwrap();

    let x: Vec<f64> = (0..size).map(|i| i as f64 * 10.0 / size as f64).collect();
    let mut y: Vec<f64> = x
        .iter()
        .map(|&xi| xi.sin() + noise_dist.sample(&mut rng))
        .collect();

    for _ in 0..size / 20 {
        let idx = rng.random_range(0..size);
        y[idx] += outlier_dist.sample(&mut rng);
    }
    (x, y)
}

/// Generate clustered x-values (groups with tiny spacing).
fn generate_clustered_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.1).unwrap();

    let x: Vec<f64> = (0..size)
        .map(|i| (i / 100) as f64 + (i % 100) as f64 * 1e-6)
        .collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| xi.sin() + noise_dist.sample(&mut rng))
        .collect();
    (x, y)
}

/// Generate high-noise data (SNR < 1).
fn generate_high_noise_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 2.0).unwrap();

    let x: Vec<f64> = (0..size).map(|i| i as f64 * 10.0 / size as f64).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| xi.sin() * 0.5 + noise_dist.sample(&mut rng))
        .collect();
    (x, y)
}

/// Evenly spaced query grid covering `[lo, hi]`.
fn query_grid(m: usize, lo: f64, hi: f64) -> Vec<f64> {
    (0..m)
        .map(|i| lo + (hi - lo) * i as f64 / (m - 1).max(1) as f64)
        .collect()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(20);

    for size in [500, 1_000, 5_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        let (x, y) = generate_sine_data(size, 42);
        let eval = query_grid(size, 0.0, 10.0);
        let model = Loess::new().span(0.1).degree(Linear).build().unwrap();

        group.bench_with_input(BenchmarkId::new("evaluate", size), &size, |b, _| {
            b.iter(|| model.evaluate(black_box(&x), black_box(&y), black_box(&eval)))
        });
    }
    group.finish();
}

fn bench_query_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_count");
    group.sample_size(50);

    let (x, y) = generate_sine_data(2_000, 42);
    let model = Loess::new().span(0.2).build().unwrap();

    for m in [10, 100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(m as u64));
        let eval = query_grid(m, -1.0, 11.0);

        group.bench_with_input(BenchmarkId::new("queries", m), &m, |b, _| {
            b.iter(|| model.evaluate(black_box(&x), black_box(&y), black_box(&eval)))
        });
    }
    group.finish();
}

fn bench_span(c: &mut Criterion) {
    let mut group = c.benchmark_group("span");
    group.sample_size(50);

    let (x, y) = generate_sine_data(2_000, 42);
    let eval = query_grid(500, 0.0, 10.0);

    for span in [0.05, 0.1, 0.2, 0.3, 0.5, 0.75] {
        let model = Loess::new().span(span).build().unwrap();
        group.bench_with_input(BenchmarkId::new("evaluate", span), &span, |b, _| {
            b.iter(|| model.evaluate(black_box(&x), black_box(&y), black_box(&eval)))
        });
    }
    group.finish();
}

fn bench_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterations");
    group.sample_size(30);

    let (x, y) = generate_outlier_data(2_000, 42);

    for iter in [0, 1, 2, 4] {
        let model = Loess::new()
            .span(0.2)
            .degree(Linear)
            .iterations(iter)
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::new("fit", iter), &iter, |b, _| {
            b.iter(|| model.fit(black_box(&x), black_box(&y)))
        });
    }
    group.finish();
}

fn bench_chunk_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_size");
    group.sample_size(50);

    let (x, y) = generate_sine_data(2_000, 42);
    let eval = query_grid(2_000, 0.0, 10.0);

    for chunk in [16, 64, 256, 1024] {
        let model = Loess::new().span(0.1).chunk_size(chunk).build().unwrap();
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &chunk, |b, _| {
            b.iter(|| model.evaluate(black_box(&x), black_box(&y), black_box(&eval)))
        });
    }
    group.finish();
}

fn bench_weight_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("weight_functions");
    group.sample_size(50);

    let (x, y) = generate_sine_data(2_000, 42);
    let eval = query_grid(1_000, 0.0, 10.0);

    let kernels = [
        ("tricube", Tricube),
        ("epanechnikov", Epanechnikov),
        ("biweight", Biweight),
        ("triangle", Triangle),
        ("cosine", Cosine),
        ("uniform", WeightFunction::Uniform),
    ];

    for (name, wf) in kernels {
        let model = Loess::new().span(0.2).weight_function(wf).build().unwrap();
        group.bench_with_input(BenchmarkId::new("kernel", name), &wf, |b, _| {
            b.iter(|| model.evaluate(black_box(&x), black_box(&y), black_box(&eval)))
        });
    }
    group.finish();
}

fn bench_polynomial_degrees(c: &mut Criterion) {
    let mut group = c.benchmark_group("polynomial_degrees");
    group.sample_size(50);

    let (x, y) = generate_sine_data(2_000, 42);
    let eval = query_grid(1_000, 0.0, 10.0);

    let degrees = [
        ("constant", Constant),
        ("linear", Linear),
        ("quadratic", Quadratic),
        ("cubic", Cubic),
        ("quartic", Quartic),
    ];

    for (name, degree) in degrees {
        let model = Loess::new().span(0.2).degree(degree).build().unwrap();
        group.bench_with_input(BenchmarkId::new("degree", name), &degree, |b, _| {
            b.iter(|| model.evaluate(black_box(&x), black_box(&y), black_box(&eval)))
        });
    }
    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(30);

    let size = 2_000;
    let eval = query_grid(500, 0.0, 20.0);

    let (x_clustered, y_clustered) = generate_clustered_data(size, 42);
    group.bench_function("clustered", |b| {
        let model = Loess::new().span(0.3).degree(Linear).build().unwrap();
        b.iter(|| model.evaluate(black_box(&x_clustered), black_box(&y_clustered), &eval))
    });

    let (x_noisy, y_noisy) = generate_high_noise_data(size, 42);
    group.bench_function("high_noise", |b| {
        let model = Loess::new().span(0.5).iterations(3).build().unwrap();
        b.iter(|| model.evaluate(black_box(&x_noisy), black_box(&y_noisy), &eval))
    });

    let (x_outlier, y_outlier) = generate_outlier_data(size, 42);
    group.bench_function("extreme_outliers", |b| {
        let model = Loess::new()
            .span(0.2)
            .iterations(4)
            .robustness_method(Talwar)
            .build()
            .unwrap();
        b.iter(|| model.evaluate(black_box(&x_outlier), black_box(&y_outlier), &eval))
    });

    let x_const: Vec<f64> = (0..size).map(|i| i as f64).collect();
    let y_const = vec![5.0; size];
    group.bench_function("constant_y", |b| {
        let model = Loess::new().span(0.2).build().unwrap();
        b.iter(|| model.evaluate(black_box(&x_const), black_box(&y_const), &eval))
    });

    group.finish();
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap");
    group.sample_size(10);

    let (x, y) = generate_sine_data(500, 42);
    let eval = query_grid(100, 0.0, 10.0);

    for replicates in [50, 200] {
        for parallel in [false, true] {
            let model = Loess::new()
                .span(0.3)
                .degree(Linear)
                .bootstrap(BootstrapConfig::new(replicates, 0.95).seed(7))
                .parallel(parallel)
                .build()
                .unwrap();
            let id = format!("{}_{}", if parallel { "parallel" } else { "sequential" }, replicates);
            group.bench_function(id, |b| {
                b.iter(|| model.bootstrap(black_box(&x), black_box(&y), &eval))
            });
        }
    }
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel");
    group.sample_size(20);

    let (x, y) = generate_sine_data(5_000, 42);
    let eval = query_grid(20_000, 0.0, 10.0);

    for parallel in [false, true] {
        let model = Loess::new().span(0.1).parallel(parallel).build().unwrap();
        group.bench_with_input(
            BenchmarkId::new("evaluate", parallel),
            &parallel,
            |b, _| b.iter(|| model.evaluate(black_box(&x), black_box(&y), black_box(&eval))),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_query_count,
    bench_span,
    bench_iterations,
    bench_chunk_size,
    bench_weight_functions,
    bench_polynomial_degrees,
    bench_pathological,
    bench_bootstrap,
    bench_parallel,
);

criterion_main!(benches);
