//! Mathematical helpers.
//!
//! This module provides:
//! - Presentation rounding with round-half-to-even (`rounding`)

pub mod rounding;

pub use rounding::{round_absolute, round_half_even, round_relative};
