//! Exact sensitivities by symbolic differentiation.
//!
//! No interval resolution, linearity diagnostic or rounding is applied.

use sensitivity_core::symbolic::{Expr, Symbol};
use sensitivity_core::types::{ParameterSet, Result, SensitivityError};

use crate::result::{Sensitivity, SensitivityMethod, SensitivityResults};

/// Symbolic sensitivity engine.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::symbolic::{symbols, Expr};
/// use sensitivity_core::types::ParameterSet;
/// use sensitivity_engine::symbolic::SymbolicSensitivityEngine;
///
/// let params = symbols(["x", "y", "z", "w"]);
/// let values: ParameterSet = [("x", 1.0), ("y", 2.0), ("z", 3.0), ("w", 4.0)]
///     .into_iter()
///     .collect();
///
/// let f = |p: &[Expr]| (&p[0] * &p[1] + p[0].pow(&p[2])) * &p[3];
/// let results = SymbolicSensitivityEngine::new().evaluate(f, &params, &values).unwrap();
///
/// assert_eq!(results.get("x").unwrap().absolute, 20.0);
/// assert_eq!(results.get("z").unwrap().absolute, 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SymbolicSensitivityEngine;

impl SymbolicSensitivityEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }

    /// Builds `function(parameters…)` and differentiates it.
    ///
    /// # Errors
    ///
    /// See [`SymbolicSensitivityEngine::evaluate_expression`].
    pub fn evaluate<F>(
        &self,
        function: F,
        parameters: &[Symbol],
        values: &ParameterSet,
    ) -> Result<SensitivityResults>
    where
        F: Fn(&[Expr]) -> Expr,
    {
        let handles: Vec<Expr> = parameters.iter().map(Symbol::to_expr).collect();
        let expr = function(&handles);
        self.evaluate_expression(&expr, parameters, values)
    }

    /// Differentiates an already built expression.
    ///
    /// Results are keyed by parameter name in `parameters` order.
    ///
    /// # Errors
    ///
    /// - `MissingParameterValue` if a listed parameter has no value
    /// - `Symbolic(UnboundSymbol)` if the expression uses a symbol without value
    pub fn evaluate_expression(
        &self,
        expr: &Expr,
        parameters: &[Symbol],
        values: &ParameterSet,
    ) -> Result<SensitivityResults> {
        if let Some(missing) = parameters.iter().find(|p| !values.contains(p.name())) {
            return Err(SensitivityError::MissingParameterValue(
                missing.name().to_string(),
            ));
        }

        let f_op = expr.evaluate(values)?;
        tracing::debug!(expression = %expr, f_op, "evaluated operating point");

        let mut results = SensitivityResults::new(SensitivityMethod::Symbolic, f_op);
        for (parameter, derivative) in partial_derivatives(expr, parameters) {
            let absolute = derivative.evaluate(values)?;
            let value = values.get(parameter.name()).ok_or_else(|| {
                SensitivityError::MissingParameterValue(parameter.name().to_string())
            })?;
            let relative = absolute * value / f_op;
            tracing::debug!(
                parameter = parameter.name(),
                derivative = %derivative,
                absolute,
                relative,
                "computed sensitivity"
            );
            results.push(parameter.name(), Sensitivity::new(absolute, relative));
        }
        Ok(results)
    }
}

/// Returns `(parameter, ∂expr/∂parameter)` in `parameters` order.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::symbolic::{parse_expression, symbols};
/// use sensitivity_engine::symbolic::partial_derivatives;
///
/// let expr = parse_expression("x * y").unwrap();
/// let params = symbols(["x", "y"]);
/// let partials = partial_derivatives(&expr, &params);
/// assert_eq!(partials[0].1.to_string(), "y");
/// assert_eq!(partials[1].1.to_string(), "x");
/// ```
pub fn partial_derivatives<'a>(
    expr: &Expr,
    parameters: &'a [Symbol],
) -> Vec<(&'a Symbol, Expr)> {
    parameters.iter().map(|p| (p, expr.diff(p))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sensitivity_core::symbolic::{parse_expression, symbols};
    use sensitivity_core::types::SymbolicError;

    fn reference_values() -> ParameterSet {
        [("x", 1.0), ("y", 2.0), ("z", 3.0), ("w", 4.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_reference_function() {
        let params = symbols(["x", "y", "z", "w"]);
        let results = SymbolicSensitivityEngine::new()
            .evaluate(
                |p: &[Expr]| (&p[0] * &p[1] + p[0].pow(&p[2])) * &p[3],
                &params,
                &reference_values(),
            )
            .unwrap();

        assert_eq!(results.method(), SensitivityMethod::Symbolic);
        assert_eq!(results.operating_output(), 12.0);
        let absolutes: Vec<f64> = results.iter().map(|(_, s)| s.absolute).collect();
        assert_eq!(absolutes, vec![20.0, 4.0, 0.0, 3.0]);
        assert_relative_eq!(results.get("x").unwrap().relative, 20.0 / 12.0);
        assert_relative_eq!(results.get("y").unwrap().relative, 8.0 / 12.0);
        assert!(results.linearity_checks().is_empty());
    }

    #[test]
    fn test_results_are_not_rounded() {
        let expr = parse_expression("x ^ 2 / 3").unwrap();
        let values = ParameterSet::new().with("x", 1.0);
        let results = SymbolicSensitivityEngine::new()
            .evaluate_expression(&expr, &symbols(["x"]), &values)
            .unwrap();
        assert_relative_eq!(results.get("x").unwrap().absolute, 2.0 / 3.0);
    }

    #[test]
    fn test_absent_parameter_is_zero() {
        let expr = parse_expression("2 * a").unwrap();
        let values = ParameterSet::new().with("a", 1.0).with("b", 5.0);
        let results = SymbolicSensitivityEngine::new()
            .evaluate_expression(&expr, &symbols(["a", "b"]), &values)
            .unwrap();
        assert_eq!(*results.get("b").unwrap(), Sensitivity::new(0.0, 0.0));
    }

    #[test]
    fn test_missing_parameter_value() {
        let expr = parse_expression("a + b").unwrap();
        let values = ParameterSet::new().with("a", 1.0);
        let err = SymbolicSensitivityEngine::new()
            .evaluate_expression(&expr, &symbols(["a", "b"]), &values)
            .unwrap_err();
        assert!(matches!(err, SensitivityError::MissingParameterValue(name) if name == "b"));
    }

    #[test]
    fn test_unbound_symbol_in_expression() {
        let expr = parse_expression("a * k").unwrap();
        let values = ParameterSet::new().with("a", 1.0);
        let err = SymbolicSensitivityEngine::new()
            .evaluate_expression(&expr, &symbols(["a"]), &values)
            .unwrap_err();
        assert!(matches!(
            err,
            SensitivityError::Symbolic(SymbolicError::UnboundSymbol(name)) if name == "k"
        ));
    }

    #[test]
    fn test_order_follows_parameters() {
        let expr = parse_expression("a + 2*b + 3*c").unwrap();
        let values = ParameterSet::new().with("a", 1.0).with("b", 1.0).with("c", 1.0);
        let results = SymbolicSensitivityEngine::new()
            .evaluate_expression(&expr, &symbols(["c", "a", "b"]), &values)
            .unwrap();
        assert_eq!(results.names().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }
}
