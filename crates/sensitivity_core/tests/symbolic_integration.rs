//! Integration tests for the symbolic algebra.
//!
//! Exact derivatives are checked against central differences of the same
//! parsed expression, and printed expressions are checked to parse back to
//! the same value.

use approx::assert_relative_eq;
use proptest::prelude::*;
use sensitivity_core::symbolic::{parse_expression, symbols, CompiledExpression, Expr, Symbol};
use sensitivity_core::traits::TargetFunction;
use sensitivity_core::types::ParameterSet;

const FORMULAS: &[&str] = &[
    "(x*y + x^z)*w",
    "x^2 * y - 3*x/w",
    "exp(-x) * sin(y * z)",
    "sqrt(x + y) / (1 + w^2)",
    "ln(x * w) + cos(z)^2",
    "x^(y/2) - tan(z/10)",
];

fn operating_point() -> ParameterSet {
    [("x", 1.3), ("y", 0.7), ("z", 2.1), ("w", 1.9)]
        .into_iter()
        .collect()
}

fn central_difference(f: &CompiledExpression, args: &[f64], index: usize) -> f64 {
    let h = 1e-6;
    let mut up = args.to_vec();
    let mut down = args.to_vec();
    up[index] += h;
    down[index] -= h;
    (f.evaluate(&up).unwrap() - f.evaluate(&down).unwrap()) / (2.0 * h)
}

#[test]
fn test_exact_derivatives_match_central_differences() {
    let params = symbols(["x", "y", "z", "w"]);
    let values = operating_point();
    let args = values.values();

    for formula in FORMULAS {
        let expr = parse_expression(formula).unwrap();
        let compiled = CompiledExpression::new(expr.clone(), params.clone()).unwrap();
        for (index, symbol) in params.iter().enumerate() {
            let exact = expr.diff(symbol).evaluate(&values).unwrap();
            let approx = central_difference(&compiled, &args, index);
            assert_relative_eq!(exact, approx, epsilon = 1e-6, max_relative = 1e-6);
        }
    }
}

#[test]
fn test_display_parses_back() {
    let values = operating_point();
    for formula in FORMULAS {
        let expr = parse_expression(formula).unwrap();
        let reparsed = parse_expression(&expr.to_string()).unwrap();
        assert_relative_eq!(
            expr.evaluate(&values).unwrap(),
            reparsed.evaluate(&values).unwrap(),
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_derivative_display_parses_back() {
    let values = operating_point();
    let expr = parse_expression("x^x * sin(y) / w").unwrap();
    let dx = expr.diff(&Symbol::new("x"));
    let reparsed = parse_expression(&dx.to_string()).unwrap();
    assert_relative_eq!(
        dx.evaluate(&values).unwrap(),
        reparsed.evaluate(&values).unwrap(),
        max_relative = 1e-12
    );
}

#[test]
fn test_operator_built_expression_equals_parsed() {
    let p: Vec<Expr> = ["x", "y", "z", "w"].into_iter().map(Expr::symbol).collect();
    let built = (&p[0] * &p[1] + p[0].pow(&p[2])) * &p[3];
    let parsed = parse_expression("(x*y + x^z)*w").unwrap();
    assert_eq!(built, parsed);
}

proptest! {
    #[test]
    fn prop_polynomial_derivative(a in -5.0f64..5.0, b in -5.0f64..5.0, x in -3.0f64..3.0) {
        // d/dx (a x^3 + b x) = 3 a x^2 + b
        let expr = parse_expression(&format!("({}) * x^3 + ({}) * x", a, b)).unwrap();
        let values = ParameterSet::new().with("x", x);
        let got = expr.diff(&Symbol::new("x")).evaluate(&values).unwrap();
        let expected = 3.0 * a * x * x + b;
        prop_assert!((got - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }
}
