//! Expressions bound to a positional parameter order.

use super::ast::{Expr, Symbol};
use super::parser::parse_expression;
use crate::traits::{EvaluationFailure, TargetFunction};
use crate::types::{ParseError, SymbolicError};

/// An expression whose symbols are bound to argument positions.
///
/// This lets the same parsed formula drive the numerical engine, which
/// only sees positional `&[f64]` arguments.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::symbolic::{parse_expression, symbols, CompiledExpression};
/// use sensitivity_core::traits::TargetFunction;
///
/// let expr = parse_expression("(x*y + x^z)*w").unwrap();
/// let f = CompiledExpression::new(expr, symbols(["x", "y", "z", "w"])).unwrap();
/// assert_eq!(f.evaluate(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    expr: Expr,
    parameters: Vec<Symbol>,
}

impl CompiledExpression {
    /// Binds `expr` to `parameters`, in argument order.
    ///
    /// Parameters the expression never mentions are allowed.
    ///
    /// # Errors
    ///
    /// Returns `SymbolicError::UnboundSymbol` naming the first symbol of
    /// `expr` (in sorted order) that is not among `parameters`.
    pub fn new(expr: Expr, parameters: Vec<Symbol>) -> Result<Self, SymbolicError> {
        if let Some(unbound) = expr.symbols().into_iter().find(|s| !parameters.contains(s)) {
            return Err(SymbolicError::UnboundSymbol(unbound.name().to_string()));
        }
        Ok(Self { expr, parameters })
    }

    /// Parses `input` and binds it to `parameters`.
    ///
    /// # Errors
    ///
    /// Parse failures come first; binding failures are reported as a
    /// `ParseError` at position 0 naming the unbound symbol.
    pub fn parse(input: &str, parameters: Vec<Symbol>) -> Result<Self, ParseError> {
        let expr = parse_expression(input)?;
        Self::new(expr, parameters).map_err(|e| ParseError::new(0, e.to_string()))
    }

    /// Returns the underlying expression.
    #[inline]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the parameter order.
    #[inline]
    pub fn parameters(&self) -> &[Symbol] {
        &self.parameters
    }

    /// Evaluates at positional arguments.
    ///
    /// # Errors
    ///
    /// Returns `SymbolicError::ArityMismatch` if `args.len()` differs from
    /// the number of parameters.
    pub fn evaluate_at(&self, args: &[f64]) -> Result<f64, SymbolicError> {
        if args.len() != self.parameters.len() {
            return Err(SymbolicError::ArityMismatch {
                expected: self.parameters.len(),
                got: args.len(),
            });
        }
        self.expr.evaluate_with(&|s: &Symbol| {
            self.parameters
                .iter()
                .position(|p| p == s)
                .map(|i| args[i])
        })
    }
}

impl TargetFunction for CompiledExpression {
    fn evaluate(&self, args: &[f64]) -> Result<f64, EvaluationFailure> {
        self.evaluate_at(args).map_err(Into::into)
    }
}
