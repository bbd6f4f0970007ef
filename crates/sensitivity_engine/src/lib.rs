//! # sensitivity_engine: Local Sensitivity Engines
//!
//! ## Layer 2 Role
//!
//! sensitivity_engine builds on sensitivity_core and provides:
//! - Interval resolution for central differences (`interval`)
//! - The numerical engine: central differences, linearity diagnostic and
//!   presentation rounding (`numerical`)
//! - The symbolic engine: exact partial derivatives (`symbolic`)
//! - The shared result contract `SensitivityResults` (`result`)
//!
//! Both engines are synchronous, take `&self` and keep no state between
//! calls. The first failing parameter aborts the computation.
//!
//! ## Usage Example
//!
//! ```rust
//! use sensitivity_core::symbolic::{parse_expression, symbols, CompiledExpression};
//! use sensitivity_core::types::ParameterSet;
//! use sensitivity_engine::{NumericalSensitivityEngine, SymbolicSensitivityEngine};
//!
//! let params = symbols(["x", "y", "z", "w"]);
//! let expr = parse_expression("(x*y + x^z)*w").unwrap();
//! let values: ParameterSet = [("x", 1.0), ("y", 2.0), ("z", 3.0), ("w", 4.0)]
//!     .into_iter()
//!     .collect();
//!
//! let exact = SymbolicSensitivityEngine::new()
//!     .evaluate_expression(&expr, &params, &values)
//!     .unwrap();
//!
//! let compiled = CompiledExpression::new(expr, params).unwrap();
//! let estimate = NumericalSensitivityEngine::default()
//!     .evaluate(&compiled, &values)
//!     .unwrap();
//!
//! for (name, s) in exact.iter() {
//!     assert_eq!(s.absolute.round(), estimate.get(name).unwrap().absolute);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for results and configuration

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod interval;
pub mod numerical;
pub mod result;
pub mod symbolic;

pub use interval::{resolve_interval, IntervalSource};
pub use numerical::{numerical_sensitivities, NumericalConfig, NumericalSensitivityEngine};
pub use result::{LinearityCheck, Sensitivity, SensitivityMethod, SensitivityResults};
pub use symbolic::{partial_derivatives, SymbolicSensitivityEngine};
