//! Criterion micro-benchmarks for classification and formula evaluation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use pdelab_classify::{classify_pde, reduce_pde};
use pdelab_core::Grid;
use pdelab_expr::Expr;

/// Benchmark: classify and reduce 1000 deterministic coefficient sets.
fn bench_classify_reduce_1k(c: &mut Criterion) {
    let coeffs: Vec<[f64; 3]> = (0u64..1000)
        .map(|i| {
            let f = |m: u64| (i.wrapping_mul(m) % 2001) as f64 / 100.0 - 10.0;
            [
                f(6364136223846793007),
                f(1442695040888963407),
                f(2862933555777941757),
            ]
        })
        .collect();

    c.bench_function("classify_reduce_1k", |b| {
        b.iter(|| {
            for &[a, bb, cc] in &coeffs {
                black_box(classify_pde(a, bb, cc));
                black_box(reduce_pde(a, bb, cc, 1.0, 1.0, 0.0, 0.0));
            }
        });
    });
}

/// Benchmark: parse the default wave pulse formula.
fn bench_parse_pulse(c: &mut Criterion) {
    let src = "np.exp(-200*((x-0.5)**2 + (y-0.5)**2))";
    c.bench_function("parse_pulse", |b| {
        b.iter(|| black_box(Expr::parse(black_box(src)).unwrap()));
    });
}

/// Benchmark: evaluate the pulse over a 100x100 grid.
fn bench_eval_grid_100(c: &mut Criterion) {
    let grid = Grid::new(100, 100, 1.0, 1.0).unwrap();
    let expr = Expr::parse("np.exp(-200*((x-0.5)**2 + (y-0.5)**2))").unwrap();
    c.bench_function("eval_grid_100x100", |b| {
        b.iter(|| black_box(expr.eval_grid(&grid).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_classify_reduce_1k,
    bench_parse_pulse,
    bench_eval_grid_100
);
criterion_main!(benches);
