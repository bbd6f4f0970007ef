//! Interval resolution for central differencing.
//!
//! Fallback order for one parameter: explicit interval, named width,
//! default width, error.

use std::fmt;

use sensitivity_core::types::{
    DifferentiationInterval, IntervalWidthPolicy, Result, SensitivityError,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a resolved interval came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IntervalSource {
    /// Caller-supplied `[low, high]`, used verbatim
    Explicit,
    /// Width named for this parameter in a per-parameter policy
    Named,
    /// Default width of a per-parameter policy
    Default,
    /// Width of a scalar policy
    Scalar,
}

impl IntervalSource {
    /// Returns the lowercase name used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalSource::Explicit => "explicit",
            IntervalSource::Named => "named",
            IntervalSource::Default => "default",
            IntervalSource::Scalar => "scalar",
        }
    }
}

impl fmt::Display for IntervalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the differentiation interval of one parameter.
///
/// An explicit interval is returned unchanged. Otherwise the interval is
/// `[v·(1−w), v·(1+w)]` with `w` taken from the policy. A zero operating
/// value therefore yields `[0, 0]`.
///
/// # Errors
///
/// Returns `SensitivityError::MissingIntervalWidth` if the policy is
/// per-parameter and has neither a named entry nor a default.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::types::{DifferentiationInterval, IntervalWidthPolicy};
/// use sensitivity_engine::interval::resolve_interval;
///
/// let policy = IntervalWidthPolicy::Scalar(0.25);
/// let interval = resolve_interval("x", 2.0, None, &policy).unwrap();
/// assert_eq!(interval.bounds(), [1.5, 2.5]);
///
/// let explicit = DifferentiationInterval::new(0.0, 10.0);
/// let interval = resolve_interval("x", 2.0, Some(&explicit), &policy).unwrap();
/// assert_eq!(interval, explicit);
/// ```
pub fn resolve_interval(
    parameter: &str,
    value: f64,
    explicit: Option<&DifferentiationInterval>,
    policy: &IntervalWidthPolicy,
) -> Result<DifferentiationInterval> {
    resolve_interval_with_source(parameter, value, explicit, policy).map(|(interval, _)| interval)
}

/// Like [`resolve_interval`], also reporting which rule applied.
pub fn resolve_interval_with_source(
    parameter: &str,
    value: f64,
    explicit: Option<&DifferentiationInterval>,
    policy: &IntervalWidthPolicy,
) -> Result<(DifferentiationInterval, IntervalSource)> {
    let (interval, source) = match explicit {
        Some(interval) => (*interval, IntervalSource::Explicit),
        None => {
            let (width, source) = select_width(parameter, policy)?;
            (
                DifferentiationInterval::from_relative_width(value, width),
                source,
            )
        }
    };
    tracing::debug!(
        parameter,
        value,
        low = interval.low,
        high = interval.high,
        source = source.as_str(),
        "resolved differentiation interval"
    );
    Ok((interval, source))
}

fn select_width(parameter: &str, policy: &IntervalWidthPolicy) -> Result<(f64, IntervalSource)> {
    match policy {
        IntervalWidthPolicy::Scalar(w) => Ok((*w, IntervalSource::Scalar)),
        IntervalWidthPolicy::PerParameter { widths, default } => {
            if let Some(w) = widths.get(parameter) {
                Ok((*w, IntervalSource::Named))
            } else if let Some(w) = default {
                Ok((*w, IntervalSource::Default))
            } else {
                Err(SensitivityError::MissingIntervalWidth {
                    parameter: parameter.to_string(),
                })
            }
        }
    }
}
