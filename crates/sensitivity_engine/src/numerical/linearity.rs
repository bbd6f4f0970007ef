//! Linearity diagnostic for central differences.

use sensitivity_core::math::rounding::{round_half_even, LINEARITY_DECIMALS};
use sensitivity_core::types::{Result, SensitivityError};

use crate::result::LinearityCheck;

/// Computes `(f(op) − f(low)) / (f(high) − f(op))`.
///
/// A denominator of exactly zero yields 1, so a flat upper half-interval
/// never fails the check.
///
/// # Examples
///
/// ```rust
/// use sensitivity_engine::numerical::linearity_ratio;
///
/// assert_eq!(linearity_ratio(2.0, 1.0, 3.0), 1.0);
/// assert_eq!(linearity_ratio(5.0, 1.0, 5.0), 1.0);
/// assert_eq!(linearity_ratio(2.0, 1.0, 4.0), 0.5);
/// ```
#[inline]
pub fn linearity_ratio(f_op: f64, f_low: f64, f_high: f64) -> f64 {
    let denominator = f_high - f_op;
    if denominator == 0.0 {
        return 1.0;
    }
    (f_op - f_low) / denominator
}

/// Runs the diagnostic for one parameter and logs a warning if it fails.
///
/// # Errors
///
/// Returns `SensitivityError::NumericalAnomaly` if the ratio is NaN or
/// infinite despite a non-zero denominator.
pub fn check_linearity(
    parameter: &str,
    f_op: f64,
    f_low: f64,
    f_high: f64,
) -> Result<LinearityCheck> {
    let ratio = linearity_ratio(f_op, f_low, f_high);
    if !ratio.is_finite() {
        return Err(SensitivityError::NumericalAnomaly {
            parameter: parameter.to_string(),
            detail: format!(
                "linearity ratio (f(op) - f(low)) / (f(high) - f(op)) is {}",
                ratio
            ),
        });
    }

    let is_linear = round_half_even(ratio, LINEARITY_DECIMALS) == 1.0;
    if !is_linear {
        tracing::warn!(
            parameter,
            ratio,
            "the change for parameter {} is not linear, (Nop-low)/(high-norm) = {}",
            parameter,
            ratio
        );
    }

    Ok(LinearityCheck {
        parameter: parameter.to_string(),
        ratio,
        is_linear,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_response_is_linear() {
        let check = check_linearity("a", 10.0, 8.0, 12.0).unwrap();
        assert_eq!(check.ratio, 1.0);
        assert!(check.is_linear);
    }

    #[test]
    fn test_asymmetric_response_is_flagged() {
        let check = check_linearity("a", 1.0, 0.81, 1.21).unwrap();
        assert!(!check.is_linear);
        assert!(check.ratio < 1.0);
    }

    #[test]
    fn test_zero_denominator_is_exactly_one() {
        let check = check_linearity("flat", 3.0, 3.0, 3.0).unwrap();
        assert_eq!(check.ratio, 1.0);
        assert!(check.is_linear);
    }

    #[test]
    fn test_tiny_asymmetry_rounds_to_linear() {
        // 1 + 4e-7 rounds to 1.00000
        let check = check_linearity("a", 1.0, 1.0 - 1.0000004e-3, 1.0 + 1e-3).unwrap();
        assert!(check.is_linear);
    }

    #[test]
    fn test_non_finite_ratio_is_anomaly() {
        let err = check_linearity("a", f64::INFINITY, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, SensitivityError::NumericalAnomaly { .. }));
    }
}
