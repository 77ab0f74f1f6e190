use criterion::{black_box, criterion_group, criterion_main, Criterion};
use math_crout_solvers::{
    ArithmeticContext, BigFloat, Interval, factor_general, factor_symmetric, factor_tridiagonal,
};
use math_crout_interval::Bound;
use ndarray::{Array1, Array2};

/// Diagonally dominant symmetric test matrix
fn dominant_matrix(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j {
            2.0 * n as f64
        } else {
            1.0 / (1.0 + (i as f64 - j as f64).abs())
        }
    })
}

fn bench_dense_f64(c: &mut Criterion) {
    let n = 64;
    let a = dominant_matrix(n);
    let b = Array1::from_elem(n, 1.0_f64);

    c.bench_function("general_f64_64", |bench| {
        bench.iter(|| black_box(factor_general(black_box(&a), black_box(&b), &())))
    });

    c.bench_function("symmetric_f64_64", |bench| {
        bench.iter(|| black_box(factor_symmetric(black_box(&a), black_box(&b), &())))
    });
}

fn bench_dense_interval(c: &mut Criterion) {
    let n = 16;
    let ctx = ArithmeticContext::initialize::<f64>();
    let a = dominant_matrix(n).mapv(Interval::point);
    let b = Array1::from_elem(n, Interval::point(1.0_f64));

    c.bench_function("general_interval_f64_16", |bench| {
        bench.iter(|| black_box(factor_general(black_box(&a), black_box(&b), &ctx)))
    });

    let big_ctx = ArithmeticContext::initialize::<BigFloat>();
    let to_big = |v: &f64| {
        let x = BigFloat::from_f64(*v, big_ctx.precision)
            .unwrap_or_else(|_| <BigFloat as Bound>::zero());
        Interval::point(x)
    };
    let a_big = dominant_matrix(n).map(to_big);
    let b_big = Array1::from_elem(n, Interval::point(<BigFloat as Bound>::one()));

    c.bench_function("general_interval_big_16", |bench| {
        bench.iter(|| black_box(factor_general(black_box(&a_big), black_box(&b_big), &big_ctx)))
    });
}

fn bench_tridiagonal(c: &mut Criterion) {
    let n = 10_000;
    let sub = Array1::from_elem(n - 1, -1.0_f64);
    let diag = Array1::from_elem(n, 4.0_f64);
    let sup = Array1::from_elem(n - 1, -1.0_f64);
    let b = Array1::from_elem(n, 1.0_f64);

    c.bench_function("tridiagonal_f64_10000", |bench| {
        bench.iter(|| {
            black_box(factor_tridiagonal(
                black_box(&sub),
                black_box(&diag),
                black_box(&sup),
                black_box(&b),
                &(),
            ))
        })
    });
}

criterion_group!(benches, bench_dense_f64, bench_dense_interval, bench_tridiagonal);
criterion_main!(benches);
