//! Expression evaluation by substitution.

use num_traits::Float;

use super::ast::{BinaryOp, Expr, Symbol, UnaryOp};
use crate::types::{ParameterSet, SymbolicError};

impl Expr {
    /// Substitutes the operating-point values and evaluates in `f64`.
    ///
    /// Division by zero follows IEEE semantics and is not guarded.
    ///
    /// # Errors
    ///
    /// Returns `SymbolicError::UnboundSymbol` if a symbol has no value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sensitivity_core::symbolic::Expr;
    /// use sensitivity_core::types::ParameterSet;
    ///
    /// let e = Expr::symbol("a") / Expr::symbol("b");
    /// let values = ParameterSet::new().with("a", 1.0).with("b", 4.0);
    /// assert_eq!(e.evaluate(&values).unwrap(), 0.25);
    ///
    /// let partial = ParameterSet::new().with("a", 1.0);
    /// assert!(e.evaluate(&partial).is_err());
    /// ```
    pub fn evaluate(&self, values: &ParameterSet) -> Result<f64, SymbolicError> {
        self.evaluate_with(&|s: &Symbol| values.get(s.name()))
    }

    /// Evaluates with a caller-supplied symbol lookup in any `Float` type.
    ///
    /// # Errors
    ///
    /// - `SymbolicError::UnboundSymbol` if `lookup` returns `None`
    /// - `SymbolicError::UnrepresentableConstant` if a constant does not fit `T`
    pub fn evaluate_with<T, L>(&self, lookup: &L) -> Result<T, SymbolicError>
    where
        T: Float,
        L: Fn(&Symbol) -> Option<T>,
    {
        match self {
            Expr::Constant(c) => T::from(*c).ok_or(SymbolicError::UnrepresentableConstant(*c)),
            Expr::Symbol(s) => {
                lookup(s).ok_or_else(|| SymbolicError::UnboundSymbol(s.name().to_string()))
            }
            Expr::Binary { op, left, right } => {
                let l = left.evaluate_with(lookup)?;
                let r = right.evaluate_with(lookup)?;
                Ok(match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.powf(r),
                })
            }
            Expr::Unary { op, operand } => {
                let v = operand.evaluate_with(lookup)?;
                Ok(match op {
                    UnaryOp::Neg => -v,
                    UnaryOp::Exp => v.exp(),
                    UnaryOp::Ln => v.ln(),
                    UnaryOp::Sin => v.sin(),
                    UnaryOp::Cos => v.cos(),
                    UnaryOp::Tan => v.tan(),
                    UnaryOp::Sqrt => v.sqrt(),
                })
            }
        }
    }
}
