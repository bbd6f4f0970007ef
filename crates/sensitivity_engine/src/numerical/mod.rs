//! Central-difference sensitivities.
//!
//! For every parameter `p` with operating value `v`, in input order:
//!
//! 1. Resolve `[low, high]` (see [`crate::interval`])
//! 2. Evaluate the function at `low` and `high`, all other parameters fixed
//! 3. `absolute = (f(high) − f(low)) / (high − low)`
//! 4. `relative = absolute · v / f(op)`
//! 5. Run the linearity diagnostic
//! 6. Round `absolute` to an integer and `relative` to two decimals
//!
//! The first failure aborts the whole computation.

mod config;
mod linearity;

pub use config::NumericalConfig;
pub use linearity::{check_linearity, linearity_ratio};

use sensitivity_core::math::rounding::{round_absolute, round_relative};
use sensitivity_core::traits::TargetFunction;
use sensitivity_core::types::{
    DifferentiationIntervals, IntervalWidthPolicy, ParameterSet, Result, SensitivityError,
};

use crate::interval::resolve_interval_with_source;
use crate::result::{Sensitivity, SensitivityMethod, SensitivityResults};

/// Numerical sensitivity engine.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::traits::from_fn;
/// use sensitivity_core::types::ParameterSet;
/// use sensitivity_engine::numerical::NumericalSensitivityEngine;
///
/// let f = from_fn(|p: &[f64]| (p[0] * p[1] + p[0].powf(p[2])) * p[3]);
/// let values: ParameterSet = [("x", 1.0), ("y", 2.0), ("z", 3.0), ("w", 4.0)]
///     .into_iter()
///     .collect();
///
/// let results = NumericalSensitivityEngine::default().evaluate(&f, &values).unwrap();
/// assert_eq!(results.get("x").unwrap().absolute, 20.0);
/// assert_eq!(results.get("y").unwrap().relative, 0.67);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NumericalSensitivityEngine {
    config: NumericalConfig,
}

impl NumericalSensitivityEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: NumericalConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &NumericalConfig {
        &self.config
    }

    /// Computes rounded sensitivities of `function` at `values`.
    ///
    /// `function` receives one positional argument per entry of `values`,
    /// in insertion order. An empty `values` yields empty results.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the configuration does not validate
    /// - `OperatingPointEvaluation` if the unperturbed evaluation fails or is not finite
    /// - `MissingIntervalWidth` if a parameter has no width
    /// - `Evaluation` or `NonFiniteOutput` for a failing perturbed evaluation
    /// - `NumericalAnomaly` if the linearity ratio is not finite
    pub fn evaluate<F>(&self, function: &F, values: &ParameterSet) -> Result<SensitivityResults>
    where
        F: TargetFunction + ?Sized,
    {
        self.config.validate()?;

        let operating_args = values.values();
        let f_op = evaluate_operating_point(function, &operating_args)?;
        tracing::debug!(parameters = values.len(), f_op, "evaluated operating point");

        let mut results = SensitivityResults::new(SensitivityMethod::Numerical, f_op);

        for (index, (parameter, value)) in values.iter().enumerate() {
            let (interval, _) = resolve_interval_with_source(
                parameter,
                value,
                self.config.intervals.get(parameter),
                &self.config.interval_width,
            )?;

            let f_low = evaluate_perturbed(function, values, index, parameter, interval.low)?;
            let f_high = evaluate_perturbed(function, values, index, parameter, interval.high)?;

            let absolute = (f_high - f_low) / interval.width();
            let relative = absolute * value / f_op;

            let check = check_linearity(parameter, f_op, f_low, f_high)?;

            tracing::debug!(parameter, absolute, relative, "computed sensitivity");
            results.push(
                parameter,
                Sensitivity::new(round_absolute(absolute), round_relative(relative)),
            );
            results.push_diagnostics(check, interval);
        }

        Ok(results)
    }
}

/// One-shot numerical sensitivities.
///
/// Equivalent to building a [`NumericalConfig`] from `interval_width` and
/// `intervals` and calling [`NumericalSensitivityEngine::evaluate`].
pub fn numerical_sensitivities<F>(
    function: &F,
    values: &ParameterSet,
    interval_width: impl Into<IntervalWidthPolicy>,
    intervals: Option<DifferentiationIntervals>,
) -> Result<SensitivityResults>
where
    F: TargetFunction + ?Sized,
{
    let config = NumericalConfig::new()
        .with_interval_width(interval_width)
        .with_differentiation_intervals(intervals.unwrap_or_default());
    NumericalSensitivityEngine::new(config).evaluate(function, values)
}

fn evaluate_operating_point<F>(function: &F, args: &[f64]) -> Result<f64>
where
    F: TargetFunction + ?Sized,
{
    let output = function
        .evaluate(args)
        .map_err(|source| SensitivityError::OperatingPointEvaluation { source })?;
    if !output.is_finite() {
        return Err(SensitivityError::OperatingPointEvaluation {
            source: format!("non-finite output {}", output).into(),
        });
    }
    Ok(output)
}

fn evaluate_perturbed<F>(
    function: &F,
    values: &ParameterSet,
    index: usize,
    parameter: &str,
    value: f64,
) -> Result<f64>
where
    F: TargetFunction + ?Sized,
{
    let args = values.perturbed(index, value);
    let output = function
        .evaluate(&args)
        .map_err(|source| SensitivityError::Evaluation {
            parameter: parameter.to_string(),
            value,
            source,
        })?;
    if !output.is_finite() {
        return Err(SensitivityError::NonFiniteOutput {
            parameter: parameter.to_string(),
            value,
            output,
        });
    }
    Ok(output)
}
