//! Recursive-descent parser for target-function expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := unary (("*" | "/") unary)*
//! unary          := ("-" | "+") unary | power
//! power          := primary (("^" | "**") unary)?
//! primary        := number | identifier | identifier "(" additive ")" | "(" additive ")"
//! ```
//!
//! `^` binds tighter than prefix minus, so `-x^2` parses as `-(x^2)`.

use std::f64::consts::PI;

use super::ast::{BinaryOp, Expr, UnaryOp};
use crate::types::ParseError;

/// Identifiers that parse as constants, never as symbols.
pub const RESERVED_CONSTANTS: &[&str] = &["pi"];

/// Parses an expression such as `"(x*y + x^z)*w"`.
///
/// Identifiers become symbols, except for the names in [`RESERVED_CONSTANTS`]
/// and names directly followed by `(`, which must be one of the supported
/// elementary functions. `e` is an ordinary symbol; write `exp(1)` for
/// Euler's number.
///
/// # Errors
///
/// Returns a `ParseError` carrying the byte offset of the failure.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::symbolic::parse_expression;
///
/// let e = parse_expression("2 * sin(x) ^ 2").unwrap();
/// assert_eq!(e.to_string(), "2 * sin(x) ^ 2");
///
/// let err = parse_expression("x + ").unwrap_err();
/// assert_eq!(err.position, 4);
/// ```
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    ExprParser::new(input).parse()
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_additive()?;
        self.skip_whitespace();
        match self.peek() {
            None => Ok(expr),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.pos, message)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn check_str(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some('+') => BinaryOp::Add,
                Some('-') => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some('*') if !self.check_str("**") => BinaryOp::Mul,
                Some('/') => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::negate(operand))
            }
            Some('+') => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;
        self.skip_whitespace();
        if self.check_str("**") {
            self.pos += 2;
        } else if self.peek() == Some('^') {
            self.advance();
        } else {
            return Ok(base);
        }
        // Right associative; the exponent may carry its own sign
        let exponent = self.parse_unary()?;
        Ok(Expr::power(base, exponent))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                self.advance();
                let expr = self.parse_additive()?;
                self.expect_closing()?;
                Ok(expr)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_identifier(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of expression")),
        }
    }

    fn expect_closing(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.peek() != Some(')') {
            return Err(self.error("expected ')'"));
        }
        self.advance();
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos;
        self.consume_digits();
        if self.peek() == Some('.') {
            self.advance();
            self.consume_digits();
        }
        // Exponent only if followed by digits, so `2e` stays an error below
        if matches!(self.peek(), Some('e' | 'E')) {
            let mark = self.pos;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.consume_digits();
            } else {
                self.pos = mark;
            }
        }
        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(Expr::Constant)
            .map_err(|_| ParseError::new(start, format!("invalid number '{}'", text)))
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn parse_identifier(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        let name = &self.input[start..self.pos];

        self.skip_whitespace();
        if self.peek() == Some('(') {
            let op = UnaryOp::from_function_name(name)
                .ok_or_else(|| ParseError::new(start, format!("unknown function '{}'", name)))?;
            self.advance();
            let argument = self.parse_additive()?;
            self.expect_closing()?;
            return Ok(Expr::unary(op, argument));
        }

        Ok(match name {
            "pi" => Expr::Constant(PI),
            _ => Expr::symbol(name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterSet;
    use approx::assert_relative_eq;

    fn eval(input: &str, pairs: &[(&str, f64)]) -> f64 {
        let values: ParameterSet = pairs.iter().map(|(n, v)| (*n, *v)).collect();
        parse_expression(input).unwrap().evaluate(&values).unwrap()
    }

    #[test]
    fn test_reference_function() {
        let e = parse_expression("(x*y + x^z)*w").unwrap();
        assert_eq!(e.to_string(), "(x * y + x ^ z) * w");
        let got = eval(
            "(x*y + x^z)*w",
            &[("x", 1.0), ("y", 2.0), ("z", 3.0), ("w", 4.0)],
        );
        assert_eq!(got, 12.0);
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(eval("1 + 2 * 3", &[]), 7.0);
        assert_eq!(eval("10 - 4 - 3", &[]), 3.0);
        assert_eq!(eval("2 ^ 3 ^ 2", &[]), 512.0);
        assert_eq!(eval("2 ** 3", &[]), 8.0);
        assert_eq!(eval("-x^2", &[("x", 3.0)]), -9.0);
        assert_eq!(eval("2^-1", &[]), 0.5);
        assert_eq!(eval("8 / 4 / 2", &[]), 1.0);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(eval("1.5e2", &[]), 150.0);
        assert_eq!(eval(".25", &[]), 0.25);
        assert_eq!(eval("2E-1", &[]), 0.2);
    }

    #[test]
    fn test_functions_and_constants() {
        assert_relative_eq!(eval("sin(pi / 2)", &[]), 1.0);
        assert_relative_eq!(eval("ln(exp(1))", &[]), 1.0);
        assert_relative_eq!(eval("log(exp(x))", &[("x", 2.5)]), 2.5, epsilon = 1e-12);
        assert_relative_eq!(eval("sqrt(x) * cos(0)", &[("x", 16.0)]), 4.0);
    }

    #[test]
    fn test_e_is_a_symbol() {
        let expr = parse_expression("a * e").unwrap();
        assert_eq!(expr, Expr::symbol("a") * Expr::symbol("e"));
        assert_eq!(eval("a * e", &[("a", 2.0), ("e", 10.0)]), 20.0);
        assert!(parse_expression("e").unwrap().evaluate(&ParameterSet::new()).is_err());
    }

    #[test]
    fn test_identifiers_with_underscores() {
        assert_eq!(eval("k_1 * rate2", &[("k_1", 2.0), ("rate2", 5.0)]), 10.0);
    }

    #[test]
    fn test_errors_carry_position() {
        let err = parse_expression("(x + y").unwrap_err();
        assert_eq!(err.position, 6);

        let err = parse_expression("abs(x)").unwrap_err();
        assert_eq!(err.position, 0);
        assert!(err.message.contains("abs"));

        let err = parse_expression("x $ y").unwrap_err();
        assert_eq!(err.position, 2);

        assert!(parse_expression("").is_err());
        assert!(parse_expression("2e").is_err());
    }
}
