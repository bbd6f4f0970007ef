//! Presentation rounding.
//!
//! Rounds to a number of decimals with ties going to the even neighbour,
//! computed as `rint(x · 10^d) / 10^d`. Sensitivity reports use:
//! - absolute sensitivity: nearest integer
//! - relative sensitivity: 2 decimals
//! - linearity ratio comparison: 5 decimals

/// Decimals kept for absolute sensitivities.
pub const ABSOLUTE_DECIMALS: i32 = 0;

/// Decimals kept for relative sensitivities.
pub const RELATIVE_DECIMALS: i32 = 2;

/// Decimals used when comparing the linearity ratio against 1.
pub const LINEARITY_DECIMALS: i32 = 5;

/// Rounds `value` to `decimals` places, ties to even.
///
/// NaN and infinities pass through unchanged.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::math::round_half_even;
///
/// assert_eq!(round_half_even(2.5, 0), 2.0);
/// assert_eq!(round_half_even(3.5, 0), 4.0);
/// assert_eq!(round_half_even(2.0 / 3.0, 2), 0.67);
/// assert!(round_half_even(f64::NAN, 2).is_nan());
/// ```
#[inline]
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    if decimals == 0 {
        return value.round_ties_even();
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Rounds an absolute sensitivity to the nearest integer.
#[inline]
pub fn round_absolute(value: f64) -> f64 {
    round_half_even(value, ABSOLUTE_DECIMALS)
}

/// Rounds a relative sensitivity to 2 decimals.
#[inline]
pub fn round_relative(value: f64) -> f64 {
    round_half_even(value, RELATIVE_DECIMALS)
}
