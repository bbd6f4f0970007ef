//! Expression AST types and simplifying constructors.

use std::fmt;

/// Named symbolic parameter handle.
///
/// Symbols compare by name; the name is also the key used to look up the
/// operating-point value in a `ParameterSet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol.
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    /// Returns the symbol name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns the symbol as an expression.
    #[inline]
    pub fn to_expr(&self) -> Expr {
        Expr::Symbol(self.clone())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(name)
    }
}

/// Creates one symbol per name, in order.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::symbolic::symbols;
///
/// let params = symbols(["x", "y"]);
/// assert_eq!(params[1].name(), "y");
/// ```
pub fn symbols<I, S>(names: I) -> Vec<Symbol>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Symbol::new).collect()
}

/// Expression AST node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric constant.
    Constant(f64),
    /// Symbolic parameter.
    Symbol(Symbol),
    /// Binary operation.
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
    /// Unary operation or elementary function.
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a ^ b`
    Pow,
}

impl BinaryOp {
    fn apply(self, l: f64, r: f64) -> f64 {
        match self {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div => l / r,
            BinaryOp::Pow => l.powf(r),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 4,
        }
    }
}

/// Unary operators and elementary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-a`
    Neg,
    /// `exp(a)`
    Exp,
    /// Natural logarithm `ln(a)`
    Ln,
    /// `sin(a)`
    Sin,
    /// `cos(a)`
    Cos,
    /// `tan(a)`
    Tan,
    /// `sqrt(a)`
    Sqrt,
}

impl UnaryOp {
    /// Looks up an elementary function by name (`log` is an alias of `ln`).
    pub fn from_function_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "exp" => Some(UnaryOp::Exp),
            "ln" | "log" => Some(UnaryOp::Ln),
            "sin" => Some(UnaryOp::Sin),
            "cos" => Some(UnaryOp::Cos),
            "tan" => Some(UnaryOp::Tan),
            "sqrt" => Some(UnaryOp::Sqrt),
            _ => None,
        }
    }

    /// Returns the function name, `None` for negation.
    pub fn function_name(self) -> Option<&'static str> {
        match self {
            UnaryOp::Neg => None,
            UnaryOp::Exp => Some("exp"),
            UnaryOp::Ln => Some("ln"),
            UnaryOp::Sin => Some("sin"),
            UnaryOp::Cos => Some("cos"),
            UnaryOp::Tan => Some("tan"),
            UnaryOp::Sqrt => Some("sqrt"),
        }
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            UnaryOp::Neg => -v,
            UnaryOp::Exp => v.exp(),
            UnaryOp::Ln => v.ln(),
            UnaryOp::Sin => v.sin(),
            UnaryOp::Cos => v.cos(),
            UnaryOp::Tan => v.tan(),
            UnaryOp::Sqrt => v.sqrt(),
        }
    }
}

impl Expr {
    /// Creates a constant.
    #[inline]
    pub fn constant(value: f64) -> Self {
        Expr::Constant(value)
    }

    /// Creates a symbol expression.
    #[inline]
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(Symbol::new(name))
    }

    /// Returns the constant value if this is a constant.
    #[inline]
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expr::Constant(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true if this is the constant `value`.
    #[inline]
    pub fn is_constant(&self, value: f64) -> bool {
        self.as_constant() == Some(value)
    }

    /// Builds `op(left, right)`, folding constants and trivial identities.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        if let (Some(l), Some(r)) = (left.as_constant(), right.as_constant()) {
            return Expr::Constant(op.apply(l, r));
        }
        match op {
            BinaryOp::Add if left.is_constant(0.0) => right,
            BinaryOp::Add if right.is_constant(0.0) => left,
            BinaryOp::Sub if right.is_constant(0.0) => left,
            BinaryOp::Sub if left.is_constant(0.0) => Expr::unary(UnaryOp::Neg, right),
            BinaryOp::Mul if left.is_constant(0.0) || right.is_constant(0.0) => {
                Expr::Constant(0.0)
            }
            BinaryOp::Mul if left.is_constant(1.0) => right,
            BinaryOp::Mul if right.is_constant(1.0) => left,
            BinaryOp::Div if left.is_constant(0.0) => Expr::Constant(0.0),
            BinaryOp::Div if right.is_constant(1.0) => left,
            BinaryOp::Pow if right.is_constant(0.0) => Expr::Constant(1.0),
            BinaryOp::Pow if right.is_constant(1.0) => left,
            BinaryOp::Pow if left.is_constant(1.0) => Expr::Constant(1.0),
            _ => Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// Builds `op(operand)`, folding constants and double negation.
    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        if let Some(v) = operand.as_constant() {
            return Expr::Constant(op.apply(v));
        }
        match (op, operand) {
            (
                UnaryOp::Neg,
                Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: inner,
                },
            ) => *inner,
            (op, operand) => Expr::Unary {
                op,
                operand: Box::new(operand),
            },
        }
    }

    /// `left + right`
    #[inline]
    pub fn sum(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Add, left, right)
    }

    /// `left - right`
    #[inline]
    pub fn difference(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Sub, left, right)
    }

    /// `left * right`
    #[inline]
    pub fn product(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Mul, left, right)
    }

    /// `left / right`
    #[inline]
    pub fn quotient(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Div, left, right)
    }

    /// `base ^ exponent`
    #[inline]
    pub fn power(base: Expr, exponent: Expr) -> Expr {
        Expr::binary(BinaryOp::Pow, base, exponent)
    }

    /// `-operand`
    #[inline]
    pub fn negate(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::Neg, operand)
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Constant(v) if *v < 0.0 => 3,
            Expr::Constant(_) | Expr::Symbol(_) => 5,
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary {
                op: UnaryOp::Neg, ..
            } => 3,
            Expr::Unary { .. } => 5,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parenthesise: bool) -> fmt::Result {
        if parenthesise {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(v) => write!(f, "{}", v),
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::Binary { op, left, right } => {
                let p = op.precedence();
                // `^` is right associative, the others left associative
                let (left_paren, right_paren) = match op {
                    BinaryOp::Pow => (left.precedence() <= p, right.precedence() < p),
                    BinaryOp::Add | BinaryOp::Mul => {
                        (left.precedence() < p, right.precedence() < p)
                    }
                    BinaryOp::Sub | BinaryOp::Div => {
                        (left.precedence() < p, right.precedence() <= p)
                    }
                };
                left.fmt_operand(f, left_paren)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_operand(f, right_paren)
            }
            Expr::Unary { op, operand } => match op.function_name() {
                Some(name) => write!(f, "{}({})", name, operand),
                None => {
                    f.write_str("-")?;
                    operand.fmt_operand(f, operand.precedence() <= 3)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_constant_folding() {
        let e = Expr::sum(Expr::constant(2.0), Expr::constant(3.0));
        assert_eq!(e, Expr::Constant(5.0));
        let e = Expr::unary(UnaryOp::Exp, Expr::constant(0.0));
        assert_eq!(e, Expr::Constant(1.0));
    }

    #[test]
    fn test_identities() {
        assert_eq!(Expr::sum(Expr::constant(0.0), x()), x());
        assert_eq!(Expr::product(x(), Expr::constant(1.0)), x());
        assert_eq!(Expr::product(Expr::constant(0.0), x()), Expr::Constant(0.0));
        assert_eq!(Expr::power(x(), Expr::constant(1.0)), x());
        assert_eq!(Expr::power(Expr::constant(1.0), x()), Expr::Constant(1.0));
        assert_eq!(Expr::negate(Expr::negate(x())), x());
        assert_eq!(Expr::difference(Expr::constant(0.0), x()), Expr::negate(x()));
    }

    #[test]
    fn test_display_parenthesisation() {
        let y = Expr::symbol("y");
        let e = Expr::product(Expr::sum(x(), y.clone()), Expr::symbol("w"));
        assert_eq!(e.to_string(), "(x + y) * w");

        let e = Expr::difference(x(), Expr::difference(y.clone(), Expr::symbol("z")));
        assert_eq!(e.to_string(), "x - (y - z)");

        let e = Expr::power(x(), Expr::power(y.clone(), Expr::constant(2.0)));
        assert_eq!(e.to_string(), "x ^ y ^ 2");

        let e = Expr::power(Expr::negate(x()), Expr::constant(2.0));
        assert_eq!(e.to_string(), "(-x) ^ 2");

        let e = Expr::unary(UnaryOp::Ln, Expr::product(x(), y));
        assert_eq!(e.to_string(), "ln(x * y)");
    }

    #[test]
    fn test_function_names() {
        assert_eq!(UnaryOp::from_function_name("LOG"), Some(UnaryOp::Ln));
        assert_eq!(UnaryOp::from_function_name("sqrt"), Some(UnaryOp::Sqrt));
        assert_eq!(UnaryOp::from_function_name("abs"), None);
        assert_eq!(UnaryOp::Neg.function_name(), None);
    }
}
