//! Error types for structured error handling.
//!
//! This module provides:
//! - `SensitivityError`: Errors from sensitivity computations (configuration and evaluation)
//! - `SymbolicError`: Errors from evaluating symbolic expressions
//! - `ParseError`: Errors from parsing expression text

use thiserror::Error;

use crate::traits::EvaluationFailure;

/// Result alias for sensitivity computations.
pub type Result<T> = std::result::Result<T, SensitivityError>;

/// Categorised sensitivity errors.
///
/// Every variant is fatal to the call that produced it; the engines stop at
/// the first failing parameter and return no partial results.
///
/// # Variants
/// - `MissingIntervalWidth`: No explicit interval, named width or default width
/// - `InvalidConfig`: Malformed interval or width settings
/// - `Evaluation`: The target function failed at a perturbed value
/// - `OperatingPointEvaluation`: The target function failed at the operating point
/// - `NonFiniteOutput`: The target function returned NaN or an infinity
/// - `NumericalAnomaly`: A diagnostic quantity overflowed or became NaN
/// - `MissingParameterValue`: A symbolic parameter has no operating value
/// - `Symbolic`: Symbolic evaluation failed
///
/// # Examples
/// ```
/// use sensitivity_core::types::SensitivityError;
///
/// let err = SensitivityError::MissingIntervalWidth { parameter: "x".to_string() };
/// assert!(format!("{}", err).contains("parameter x"));
/// ```
#[derive(Error, Debug)]
pub enum SensitivityError {
    /// No width could be resolved for a parameter.
    #[error(
        "Missing differentiation interval for parameter {parameter}. Either specify a single \
         width, a 'default' width or one width per parameter"
    )]
    MissingIntervalWidth {
        /// Parameter whose width is unresolved
        parameter: String,
    },

    /// Invalid interval or width configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The target function failed at a perturbed parameter value.
    #[error("Function evaluation with value {value} for parameter {parameter} failed: {source}")]
    Evaluation {
        /// Parameter being perturbed
        parameter: String,
        /// Value that was substituted
        value: f64,
        /// Underlying failure reported by the function
        #[source]
        source: EvaluationFailure,
    },

    /// The target function failed at the unperturbed operating point.
    #[error("Function evaluation at the operating point failed: {source}")]
    OperatingPointEvaluation {
        /// Underlying failure reported by the function
        #[source]
        source: EvaluationFailure,
    },

    /// The target function produced a non-finite output.
    #[error(
        "Function returned non-finite output {output} with value {value} for parameter {parameter}"
    )]
    NonFiniteOutput {
        /// Parameter being perturbed
        parameter: String,
        /// Value that was substituted
        value: f64,
        /// The offending output
        output: f64,
    },

    /// A derived quantity became NaN or overflowed.
    #[error("Numerical anomaly for parameter {parameter}: {detail}")]
    NumericalAnomaly {
        /// Parameter being analysed
        parameter: String,
        /// Description of the anomaly
        detail: String,
    },

    /// A parameter has no operating-point value.
    #[error("No operating-point value for parameter {0}")]
    MissingParameterValue(String),

    /// Evaluation of a symbolic expression failed.
    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}

/// Errors from evaluating symbolic expressions.
///
/// # Examples
/// ```
/// use sensitivity_core::types::SymbolicError;
///
/// let err = SymbolicError::UnboundSymbol("k".to_string());
/// assert_eq!(format!("{}", err), "Unbound symbol: k");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolicError {
    /// A symbol in the expression has no value.
    #[error("Unbound symbol: {0}")]
    UnboundSymbol(String),

    /// A constant cannot be represented in the evaluation type.
    #[error("Constant {0} is not representable in the evaluation type")]
    UnrepresentableConstant(f64),

    /// Positional arguments do not match the declared parameters.
    #[error("Expected {expected} arguments, got {got}")]
    ArityMismatch {
        /// Number of declared parameters
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },
}

/// Expression parse error with byte position.
///
/// # Examples
/// ```
/// use sensitivity_core::symbolic::parse_expression;
///
/// let err = parse_expression("x + ").unwrap_err();
/// assert_eq!(err.position, 4);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error at position {position}: {message}")]
pub struct ParseError {
    /// Byte offset in the input where parsing failed
    pub position: usize,
    /// Description of the failure
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_width_names_parameter() {
        let err = SensitivityError::MissingIntervalWidth {
            parameter: "alpha".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("alpha"));
        assert!(msg.contains("'default'"));
    }

    #[test]
    fn test_evaluation_error_keeps_source() {
        let err = SensitivityError::Evaluation {
            parameter: "x".to_string(),
            value: 0.95,
            source: "domain error".into(),
        };
        assert_eq!(
            err.to_string(),
            "Function evaluation with value 0.95 for parameter x failed: domain error"
        );
        assert_eq!(err.source().unwrap().to_string(), "domain error");
    }

    #[test]
    fn test_symbolic_error_is_transparent() {
        let err: SensitivityError = SymbolicError::UnboundSymbol("q".to_string()).into();
        assert_eq!(err.to_string(), "Unbound symbol: q");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(3, "Expected ')'");
        assert_eq!(err.to_string(), "Parse error at position 3: Expected ')'");
    }
}
