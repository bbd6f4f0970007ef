//! Exact symbolic differentiation.

use std::collections::BTreeSet;

use super::ast::{BinaryOp, Expr, Symbol, UnaryOp};

impl Expr {
    /// Returns the partial derivative with respect to `var`.
    ///
    /// The result is simplified by the folding constructors. If `var` does
    /// not occur in the expression the derivative is exactly `Constant(0)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sensitivity_core::symbolic::{Expr, Symbol};
    ///
    /// let x = Expr::symbol("x");
    /// let f = x.pow(3) + 2.0 * &x;
    ///
    /// assert_eq!(f.diff(&Symbol::new("x")).to_string(), "3 * x ^ 2 + 2");
    /// assert_eq!(f.diff(&Symbol::new("k")), Expr::Constant(0.0));
    /// ```
    pub fn diff(&self, var: &Symbol) -> Expr {
        if !self.contains(var) {
            return Expr::Constant(0.0);
        }
        match self {
            Expr::Constant(_) => Expr::Constant(0.0),
            Expr::Symbol(s) => Expr::Constant(if s == var { 1.0 } else { 0.0 }),
            Expr::Binary { op, left, right } => {
                let (f, g) = (left.as_ref(), right.as_ref());
                match op {
                    BinaryOp::Add => Expr::sum(f.diff(var), g.diff(var)),
                    BinaryOp::Sub => Expr::difference(f.diff(var), g.diff(var)),
                    BinaryOp::Mul => Expr::sum(
                        Expr::product(f.diff(var), g.clone()),
                        Expr::product(f.clone(), g.diff(var)),
                    ),
                    BinaryOp::Div => Expr::quotient(
                        Expr::difference(
                            Expr::product(f.diff(var), g.clone()),
                            Expr::product(f.clone(), g.diff(var)),
                        ),
                        Expr::power(g.clone(), Expr::Constant(2.0)),
                    ),
                    BinaryOp::Pow => power_rule(f, g, var),
                }
            }
            Expr::Unary { op, operand } => {
                let u = operand.as_ref();
                let outer = match op {
                    UnaryOp::Neg => return Expr::negate(u.diff(var)),
                    UnaryOp::Exp => u.exp(),
                    UnaryOp::Ln => Expr::quotient(Expr::Constant(1.0), u.clone()),
                    UnaryOp::Sin => u.cos(),
                    UnaryOp::Cos => Expr::negate(u.sin()),
                    UnaryOp::Tan => Expr::quotient(
                        Expr::Constant(1.0),
                        Expr::power(u.cos(), Expr::Constant(2.0)),
                    ),
                    UnaryOp::Sqrt => Expr::quotient(
                        Expr::Constant(1.0),
                        Expr::product(Expr::Constant(2.0), u.sqrt()),
                    ),
                };
                Expr::product(outer, u.diff(var))
            }
        }
    }

    /// Returns true if `var` occurs in the expression.
    pub fn contains(&self, var: &Symbol) -> bool {
        match self {
            Expr::Constant(_) => false,
            Expr::Symbol(s) => s == var,
            Expr::Binary { left, right, .. } => left.contains(var) || right.contains(var),
            Expr::Unary { operand, .. } => operand.contains(var),
        }
    }

    /// Returns every symbol in the expression, sorted and deduplicated.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut found = BTreeSet::new();
        self.collect_symbols(&mut found);
        found.into_iter().collect()
    }

    fn collect_symbols(&self, found: &mut BTreeSet<Symbol>) {
        match self {
            Expr::Constant(_) => {}
            Expr::Symbol(s) => {
                found.insert(s.clone());
            }
            Expr::Binary { left, right, .. } => {
                left.collect_symbols(found);
                right.collect_symbols(found);
            }
            Expr::Unary { operand, .. } => operand.collect_symbols(found),
        }
    }
}

/// d/dx (f^g), choosing the simplest applicable form.
fn power_rule(f: &Expr, g: &Expr, var: &Symbol) -> Expr {
    let base_varies = f.contains(var);
    let exponent_varies = g.contains(var);
    match (base_varies, exponent_varies) {
        // g · f^(g−1) · f'
        (true, false) => Expr::product(
            Expr::product(
                g.clone(),
                Expr::power(f.clone(), Expr::difference(g.clone(), Expr::Constant(1.0))),
            ),
            f.diff(var),
        ),
        // f^g · ln(f) · g'
        (false, true) => Expr::product(
            Expr::product(Expr::power(f.clone(), g.clone()), f.ln()),
            g.diff(var),
        ),
        // f^g · (g' · ln(f) + g · f' / f)
        (true, true) => Expr::product(
            Expr::power(f.clone(), g.clone()),
            Expr::sum(
                Expr::product(g.diff(var), f.ln()),
                Expr::quotient(Expr::product(g.clone(), f.diff(var)), f.clone()),
            ),
        ),
        (false, false) => Expr::Constant(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterSet;
    use approx::assert_relative_eq;

    fn at(pairs: &[(&str, f64)]) -> ParameterSet {
        pairs.iter().map(|(n, v)| (*n, *v)).collect()
    }

    #[test]
    fn test_polynomial_derivative() {
        let x = Expr::symbol("x");
        let f = 3.0 * x.pow(2) - &x + 7.0;
        let df = f.diff(&Symbol::new("x"));
        assert_relative_eq!(df.evaluate(&at(&[("x", 2.0)])).unwrap(), 11.0);
    }

    #[test]
    fn test_product_and_quotient_rules() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let f = (&x * &y) / (&x + &y);
        let values = at(&[("x", 1.0), ("y", 3.0)]);
        // y^2 / (x + y)^2
        assert_relative_eq!(
            f.diff(&Symbol::new("x")).evaluate(&values).unwrap(),
            9.0 / 16.0,
            epsilon = 1e-12
        );
        // x^2 / (x + y)^2
        assert_relative_eq!(
            f.diff(&Symbol::new("y")).evaluate(&values).unwrap(),
            1.0 / 16.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_exponent_varies() {
        let x = Expr::symbol("x");
        let z = Expr::symbol("z");
        let f = x.pow(&z);
        let values = at(&[("x", 2.0), ("z", 3.0)]);
        assert_relative_eq!(
            f.diff(&Symbol::new("z")).evaluate(&values).unwrap(),
            8.0 * 2f64.ln(),
            epsilon = 1e-12
        );
        assert_relative_eq!(f.diff(&Symbol::new("x")).evaluate(&values).unwrap(), 12.0);
    }

    #[test]
    fn test_base_and_exponent_vary() {
        // d/dx x^x = x^x (ln x + 1)
        let x = Expr::symbol("x");
        let f = x.pow(&x);
        let df = f.diff(&Symbol::new("x"));
        let value = df.evaluate(&at(&[("x", 2.0)])).unwrap();
        assert_relative_eq!(value, 4.0 * (2f64.ln() + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_chain_rule_functions() {
        let x = Expr::symbol("x");
        let values = at(&[("x", 0.5)]);
        let var = Symbol::new("x");

        let cases: Vec<(Expr, f64)> = vec![
            ((2.0 * &x).exp(), 2.0 * 1f64.exp()),
            (x.pow(2).ln(), 2.0 / 0.5),
            (x.sin(), 0.5f64.cos()),
            (x.cos(), -0.5f64.sin()),
            (x.tan(), 1.0 / 0.5f64.cos().powi(2)),
            (x.sqrt(), 0.5 / 0.5f64.sqrt()),
            (-x.pow(3), -3.0 * 0.25),
        ];
        for (f, expected) in cases {
            let got = f.diff(&var).evaluate(&values).unwrap();
            assert_relative_eq!(got, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_absent_symbol_is_exact_zero() {
        let x = Expr::symbol("x");
        let f = (x.pow(2) + 1.0).ln();
        assert_eq!(f.diff(&Symbol::new("y")), Expr::Constant(0.0));
    }

    #[test]
    fn test_symbols_sorted_unique() {
        let f = Expr::symbol("z") * Expr::symbol("a") + Expr::symbol("z");
        let names: Vec<String> = f.symbols().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["a", "z"]);
    }
}
