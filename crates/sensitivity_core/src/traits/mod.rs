//! Core traits for target functions.
//!
//! This module defines the positional function contract consumed by the
//! numerical sensitivity engine:
//! - `TargetFunction`: one `f64` argument per parameter, scalar `f64` output
//! - `from_fn`: adapter for infallible closures

pub mod function;

pub use function::{from_fn, EvaluationFailure, FnFunction, TargetFunction};
