//! Criterion benchmarks for the acceptance-interval driver hot path.
//!
//! Run with: cargo bench -p wgfp-interval
//! HTML reports: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wgfp_bits::f32::SUBNORMAL_POSITIVE_MIN;
use wgfp_interval::builtins::{
    addition_interval, multiplication_interval, tan_interval, ulp_interval,
};
use wgfp_interval::geometry::{determinant_interval, dot_interval};
use wgfp_interval::FpInterval;

// ============================================================================
// Scalar drivers
// ============================================================================

fn bench_scalar_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar/candidate-expansion");

    // One candidate: exactly representable.
    group.bench_function("addition/representable", |b| {
        b.iter(|| addition_interval(black_box(1.5), black_box(2.5)))
    });
    // Two candidates per operand: unrepresentable reals.
    group.bench_function("addition/unrepresentable", |b| {
        b.iter(|| addition_interval(black_box(0.1), black_box(0.2)))
    });
    // Three candidates per operand: subnormals add the flush candidate.
    group.bench_function("addition/subnormal", |b| {
        b.iter(|| {
            addition_interval(
                black_box(SUBNORMAL_POSITIVE_MIN),
                black_box(SUBNORMAL_POSITIVE_MIN),
            )
        })
    });
    // Non-point domains evaluate every bound combination.
    group.bench_function("multiplication/interval-operands", |b| {
        b.iter(|| {
            multiplication_interval(
                black_box(FpInterval::new(0.1, 0.2)),
                black_box(FpInterval::new(-0.2, 0.3)),
            )
        })
    });
    group.finish();
}

fn bench_error_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar/error-bounds");
    for n in [1.0, 0.1, SUBNORMAL_POSITIVE_MIN] {
        group.bench_with_input(BenchmarkId::new("ulp", n), &n, |b, &n| {
            b.iter(|| ulp_interval(black_box(n), black_box(4096.0)))
        });
    }
    group.finish();
}

fn bench_composed(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar/composed");
    // tan recomputes sin and cos independently each call.
    group.bench_function("tan", |b| b.iter(|| tan_interval(black_box(0.5))));
    group.finish();
}

// ============================================================================
// Vector and matrix drivers
// ============================================================================

fn bench_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector/dot");
    let lanes = [0.1, -0.2, 0.3, -0.4];
    for arity in [2usize, 3, 4] {
        group.throughput(Throughput::Elements(arity as u64));
        group.bench_with_input(BenchmarkId::new("points", arity), &arity, |b, &arity| {
            b.iter(|| dot_interval(black_box(&lanes[..arity]), black_box(&lanes[..arity])))
        });
    }
    // Worst case: every lane subnormal, so every lane carries a flush
    // candidate and the cartesian product is maximal.
    let subnormals = [SUBNORMAL_POSITIVE_MIN; 4];
    group.bench_function("points/4-all-subnormal", |b| {
        b.iter(|| dot_interval(black_box(&subnormals[..]), black_box(&subnormals[..])))
    });
    group.finish();
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix/determinant");
    let m2 = vec![vec![1.0, 3.0], vec![2.0, 4.0]];
    let m3 = vec![
        vec![1.0, 4.0, 7.0],
        vec![2.0, 5.0, 8.0],
        vec![3.0, 6.0, 10.0],
    ];
    let m4 = vec![
        vec![1.0, 5.0, 9.0, 13.0],
        vec![2.0, 6.0, 10.0, 14.0],
        vec![3.0, 7.0, 11.0, 16.0],
        vec![4.0, 8.0, 12.0, 15.0],
    ];
    group.bench_with_input(BenchmarkId::new("cofactor", 2), &m2, |b, m| {
        b.iter(|| determinant_interval(black_box(m)))
    });
    group.bench_with_input(BenchmarkId::new("cofactor", 3), &m3, |b, m| {
        b.iter(|| determinant_interval(black_box(m)))
    });
    group.bench_with_input(BenchmarkId::new("cofactor", 4), &m4, |b, m| {
        b.iter(|| determinant_interval(black_box(m)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_candidates,
    bench_error_bounds,
    bench_composed,
    bench_dot,
    bench_determinant
);
criterion_main!(benches);
