//! Error types for grid sampling and export.

use sensitivity_core::traits::EvaluationFailure;
use thiserror::Error;

/// Result alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Grid sampling and export errors.
#[derive(Debug, Error)]
pub enum GridError {
    /// Step count must be at least one.
    #[error("Invalid step count: {0}. At least one step is required")]
    InvalidSteps(usize),

    /// A slice axis names a parameter that is not in the parameter set.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Both slice axes name the same parameter.
    #[error("Grid axes must be distinct parameters, got {0} twice")]
    DuplicateAxis(String),

    /// The sampled function failed at a grid point.
    #[error("Function evaluation at x = {x}, y = {y} failed: {source}")]
    Evaluation {
        /// X coordinate
        x: f64,
        /// Y coordinate
        y: f64,
        /// Underlying failure
        #[source]
        source: EvaluationFailure,
    },

    /// CSV serialisation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
