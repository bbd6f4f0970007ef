//! Operator overloading and elementary functions for [`Expr`].
//!
//! Arithmetic works on any mix of `Expr`, `&Expr` and `f64`, so target
//! functions over symbolic handles read like their numeric counterparts:
//!
//! ```rust
//! use sensitivity_core::symbolic::Expr;
//!
//! let f = |p: &[Expr]| (&p[0] * &p[1] + p[0].pow(&p[2])) * &p[3];
//! let params: Vec<Expr> = ["x", "y", "z", "w"].into_iter().map(Expr::symbol).collect();
//! assert_eq!(f(&params).to_string(), "(x * y + x ^ z) * w");
//! ```

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::ast::{BinaryOp, Expr, Symbol, UnaryOp};

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Constant(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Constant(f64::from(value))
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Expr::Symbol(symbol)
    }
}

impl From<&Symbol> for Expr {
    fn from(symbol: &Symbol) -> Self {
        Expr::Symbol(symbol.clone())
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait<Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self, rhs.clone())
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self.clone(), rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self.clone(), rhs.clone())
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                Expr::binary($op, self, Expr::Constant(rhs))
            }
        }

        impl $trait<f64> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                Expr::binary($op, self.clone(), Expr::Constant(rhs))
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, Expr::Constant(self), rhs)
            }
        }

        impl $trait<&Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, Expr::Constant(self), rhs.clone())
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOp::Add);
impl_binary_op!(Sub, sub, BinaryOp::Sub);
impl_binary_op!(Mul, mul, BinaryOp::Mul);
impl_binary_op!(Div, div, BinaryOp::Div);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::negate(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::negate(self.clone())
    }
}

impl Expr {
    /// `self ^ exponent`
    pub fn pow(&self, exponent: impl Into<Expr>) -> Expr {
        Expr::power(self.clone(), exponent.into())
    }

    /// `exp(self)`
    pub fn exp(&self) -> Expr {
        Expr::unary(UnaryOp::Exp, self.clone())
    }

    /// Natural logarithm `ln(self)`
    pub fn ln(&self) -> Expr {
        Expr::unary(UnaryOp::Ln, self.clone())
    }

    /// `sin(self)`
    pub fn sin(&self) -> Expr {
        Expr::unary(UnaryOp::Sin, self.clone())
    }

    /// `cos(self)`
    pub fn cos(&self) -> Expr {
        Expr::unary(UnaryOp::Cos, self.clone())
    }

    /// `tan(self)`
    pub fn tan(&self) -> Expr {
        Expr::unary(UnaryOp::Tan, self.clone())
    }

    /// `sqrt(self)`
    pub fn sqrt(&self) -> Expr {
        Expr::unary(UnaryOp::Sqrt, self.clone())
    }
}
