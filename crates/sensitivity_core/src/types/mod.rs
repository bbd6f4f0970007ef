//! Core data types for sensitivity studies.
//!
//! This module provides:
//! - `ParameterSet`: ordered operating-point assignment
//! - `DifferentiationInterval` / `DifferentiationIntervals`: explicit `[low, high]` bounds
//! - `IntervalWidthPolicy`: relative interval widths (scalar or per parameter)
//! - Error types (`error`)

pub mod error;
pub mod interval;
pub mod parameter;

pub use error::{ParseError, Result, SensitivityError, SymbolicError};
pub use interval::{
    DifferentiationInterval, DifferentiationIntervals, IntervalWidthPolicy,
    DEFAULT_INTERVAL_WIDTH, DEFAULT_WIDTH_KEY,
};
pub use parameter::ParameterSet;
