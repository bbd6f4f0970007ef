//! Configuration for the numerical sensitivity engine.

use sensitivity_core::types::{
    DifferentiationInterval, DifferentiationIntervals, IntervalWidthPolicy, Result,
    SensitivityError,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for central-difference sensitivities.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `interval_width` | `Scalar(0.05)` | Relative width either side of the operating value |
/// | `intervals` | empty | Explicit `[low, high]` per parameter, overriding the width |
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::types::IntervalWidthPolicy;
/// use sensitivity_engine::numerical::NumericalConfig;
///
/// let config = NumericalConfig::new()
///     .with_interval_width(IntervalWidthPolicy::per_parameter().with_default(0.1))
///     .with_interval("x", (0.9, 1.1));
///
/// assert!(config.validate().is_ok());
/// assert!(config.intervals.get("x").is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NumericalConfig {
    /// Relative interval width policy.
    pub interval_width: IntervalWidthPolicy,

    /// Explicit intervals, taking precedence over `interval_width`.
    pub intervals: DifferentiationIntervals,
}

impl NumericalConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width policy; a bare `f64` becomes a scalar policy.
    pub fn with_interval_width(mut self, policy: impl Into<IntervalWidthPolicy>) -> Self {
        self.interval_width = policy.into();
        self
    }

    /// Replaces all explicit intervals.
    pub fn with_differentiation_intervals(mut self, intervals: DifferentiationIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// Adds one explicit interval.
    pub fn with_interval(
        mut self,
        parameter: impl Into<String>,
        interval: impl Into<DifferentiationInterval>,
    ) -> Self {
        self.intervals.insert(parameter, interval.into());
        self
    }

    /// Validates the configuration.
    ///
    /// Widths must be finite and explicit bounds must be finite.
    pub fn validate(&self) -> Result<()> {
        self.interval_width.validate()?;
        for (name, interval) in self.intervals.iter() {
            if !(interval.low.is_finite() && interval.high.is_finite()) {
                return Err(SensitivityError::InvalidConfig(format!(
                    "differentiation interval for {} must be finite, got [{}, {}]",
                    name, interval.low, interval.high
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NumericalConfig::default();
        assert_eq!(config.interval_width, IntervalWidthPolicy::Scalar(0.05));
        assert!(config.intervals.is_empty());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = NumericalConfig::new()
            .with_interval_width(0.2)
            .with_interval("y", [1.0, 3.0]);
        assert_eq!(config.interval_width, IntervalWidthPolicy::Scalar(0.2));
        assert_eq!(
            config.intervals.get("y"),
            Some(&DifferentiationInterval::new(1.0, 3.0))
        );

        let replaced = config.with_differentiation_intervals(DifferentiationIntervals::new());
        assert!(replaced.intervals.is_empty());
    }

    #[test]
    fn test_config_validation_invalid_width() {
        let config = NumericalConfig::new().with_interval_width(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(SensitivityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_validation_invalid_interval() {
        let config = NumericalConfig::new().with_interval("x", (0.0, f64::INFINITY));
        assert!(config.validate().is_err());
    }
}
