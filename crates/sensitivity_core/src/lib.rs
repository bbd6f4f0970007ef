//! # sensitivity_core: Foundation for Local Sensitivity Analysis
//!
//! ## Layer 1 (Foundation) Role
//!
//! sensitivity_core is the bottom layer of the workspace, providing:
//! - Operating-point types: `ParameterSet`, `DifferentiationInterval`,
//!   `IntervalWidthPolicy` (`types`)
//! - Error types: `SensitivityError`, `SymbolicError`, `ParseError` (`types::error`)
//! - Presentation rounding with round-half-to-even (`math::rounding`)
//! - The positional target-function contract `TargetFunction` (`traits`)
//! - A small symbolic algebra: expressions, exact differentiation,
//!   evaluation and a text parser (`symbolic`)
//!
//! ## Dependencies
//!
//! Layer 1 has no dependencies on other sensitivity_* crates:
//! - num-traits: generic evaluation of symbolic expressions
//! - thiserror: error enums
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use sensitivity_core::symbolic::{parse_expression, Symbol};
//! use sensitivity_core::types::ParameterSet;
//!
//! let expr = parse_expression("(x*y + x^z)*w").unwrap();
//! let values: ParameterSet = [("x", 1.0), ("y", 2.0), ("z", 3.0), ("w", 4.0)]
//!     .into_iter()
//!     .collect();
//!
//! assert_eq!(expr.evaluate(&values).unwrap(), 12.0);
//!
//! let dx = expr.diff(&Symbol::new("x"));
//! assert_eq!(dx.evaluate(&values).unwrap(), 20.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for intervals and width policies

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod symbolic;
pub mod traits;
pub mod types;

pub use traits::{from_fn, EvaluationFailure, TargetFunction};
pub use types::{
    DifferentiationInterval, DifferentiationIntervals, IntervalWidthPolicy, ParameterSet,
    ParseError, SensitivityError, SymbolicError,
};
