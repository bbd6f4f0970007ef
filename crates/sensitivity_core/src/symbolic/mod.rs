//! Symbolic expression algebra.
//!
//! - [`Expr`]: expression AST with simplifying constructors and operators
//! - [`Expr::diff`]: exact partial derivatives
//! - [`Expr::evaluate`]: substitution of operating-point values
//! - [`parse_expression`]: text parser for formulas such as `"(x*y + x^z)*w"`
//! - [`CompiledExpression`]: an expression bound to positional arguments

mod ast;
mod compiled;
mod diff;
mod eval;
mod ops;
mod parser;

pub use ast::{symbols, BinaryOp, Expr, Symbol, UnaryOp};
pub use compiled::CompiledExpression;
pub use parser::{parse_expression, RESERVED_CONSTANTS};
