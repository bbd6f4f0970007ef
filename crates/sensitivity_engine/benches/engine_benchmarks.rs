//! Criterion benchmarks for the sensitivity engines.
//!
//! Benchmarks cover:
//! - Numerical sensitivities of a closure with a growing parameter count
//! - Numerical sensitivities of a parsed, compiled expression
//! - Symbolic sensitivities of the same expression

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sensitivity_core::symbolic::{parse_expression, symbols, CompiledExpression};
use sensitivity_core::traits::from_fn;
use sensitivity_core::types::ParameterSet;
use sensitivity_engine::{NumericalSensitivityEngine, SymbolicSensitivityEngine};

fn reference_values() -> ParameterSet {
    [("x", 1.0), ("y", 2.0), ("z", 3.0), ("w", 4.0)]
        .into_iter()
        .collect()
}

fn bench_numerical_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("numerical_closure");
    let engine = NumericalSensitivityEngine::default();

    for n_params in [4usize, 16, 64] {
        let values: ParameterSet = (0..n_params)
            .map(|i| (format!("p{}", i), 1.0 + i as f64 * 0.1))
            .collect();
        // Weighted sum of squares
        let f = from_fn(|p: &[f64]| {
            p.iter()
                .enumerate()
                .map(|(i, v)| (i as f64 + 1.0) * v * v)
                .sum::<f64>()
        });
        group.bench_with_input(BenchmarkId::new("params", n_params), &values, |b, values| {
            b.iter(|| engine.evaluate(black_box(&f), black_box(values)))
        });
    }
    group.finish();
}

fn bench_reference_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_expression");
    let values = reference_values();
    let params = symbols(["x", "y", "z", "w"]);
    let expr = match parse_expression("(x*y + x^z)*w") {
        Ok(expr) => expr,
        Err(e) => panic!("benchmark expression must parse: {e}"),
    };
    let compiled = match CompiledExpression::new(expr.clone(), params.clone()) {
        Ok(compiled) => compiled,
        Err(e) => panic!("benchmark expression must bind: {e}"),
    };

    let numerical = NumericalSensitivityEngine::default();
    group.bench_function("numerical_compiled", |b| {
        b.iter(|| numerical.evaluate(black_box(&compiled), black_box(&values)))
    });

    let symbolic = SymbolicSensitivityEngine::new();
    group.bench_function("symbolic", |b| {
        b.iter(|| symbolic.evaluate_expression(black_box(&expr), &params, black_box(&values)))
    });
    group.finish();
}

criterion_group!(benches, bench_numerical_closure, bench_reference_expression);
criterion_main!(benches);
