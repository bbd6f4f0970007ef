//! Differentiation intervals and interval-width policies.
//!
//! - [`DifferentiationInterval`]: explicit absolute `[low, high]` bounds
//! - [`DifferentiationIntervals`]: explicit bounds keyed by parameter name
//! - [`IntervalWidthPolicy`]: relative widths, either one scalar for every
//!   parameter or a per-parameter table with an optional default

use std::collections::HashMap;

use super::error::SensitivityError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default relative interval width (5% either side of the operating value).
pub const DEFAULT_INTERVAL_WIDTH: f64 = 0.05;

/// Key that holds the fallback width in a serialised per-parameter table.
pub const DEFAULT_WIDTH_KEY: &str = "default";

/// Explicit `[low, high]` bounds used for central differencing.
///
/// Bounds are used verbatim; they need not straddle the operating value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DifferentiationInterval {
    /// Lower perturbed value
    pub low: f64,
    /// Upper perturbed value
    pub high: f64,
}

impl DifferentiationInterval {
    /// Creates an interval from explicit bounds.
    #[inline]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Derives `[v·(1−w), v·(1+w)]` from a relative width.
    ///
    /// A zero operating value collapses to `[0, 0]`.
    #[inline]
    pub fn from_relative_width(value: f64, width: f64) -> Self {
        Self {
            low: value * (1.0 - width),
            high: value * (1.0 + width),
        }
    }

    /// Returns `high − low`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the bounds in evaluation order.
    #[inline]
    pub fn bounds(&self) -> [f64; 2] {
        [self.low, self.high]
    }

    /// Interprets a list of bounds.
    ///
    /// An empty list means "not supplied" and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `SensitivityError::InvalidConfig` for any length other than 0 or 2.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sensitivity_core::types::DifferentiationInterval;
    ///
    /// assert_eq!(DifferentiationInterval::from_slice(&[]).unwrap(), None);
    /// assert_eq!(
    ///     DifferentiationInterval::from_slice(&[0.9, 1.1]).unwrap(),
    ///     Some(DifferentiationInterval::new(0.9, 1.1))
    /// );
    /// assert!(DifferentiationInterval::from_slice(&[1.0]).is_err());
    /// ```
    pub fn from_slice(bounds: &[f64]) -> Result<Option<Self>, SensitivityError> {
        match bounds {
            [] => Ok(None),
            [low, high] => Ok(Some(Self::new(*low, *high))),
            other => Err(SensitivityError::InvalidConfig(format!(
                "differentiation interval must be [low, high], got {} values",
                other.len()
            ))),
        }
    }
}

impl From<(f64, f64)> for DifferentiationInterval {
    fn from((low, high): (f64, f64)) -> Self {
        Self::new(low, high)
    }
}

impl From<[f64; 2]> for DifferentiationInterval {
    fn from([low, high]: [f64; 2]) -> Self {
        Self::new(low, high)
    }
}

/// Explicit differentiation intervals keyed by parameter name.
///
/// Parameters without an entry fall back to the width policy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DifferentiationIntervals {
    by_parameter: HashMap<String, DifferentiationInterval>,
}

impl DifferentiationIntervals {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interval for a parameter.
    ///
    /// # Returns
    ///
    /// The previous interval if one was set.
    pub fn insert(
        &mut self,
        parameter: impl Into<String>,
        interval: impl Into<DifferentiationInterval>,
    ) -> Option<DifferentiationInterval> {
        self.by_parameter.insert(parameter.into(), interval.into())
    }

    /// Builder-style insert.
    pub fn with_interval(
        mut self,
        parameter: impl Into<String>,
        interval: impl Into<DifferentiationInterval>,
    ) -> Self {
        self.insert(parameter, interval);
        self
    }

    /// Returns the interval for a parameter.
    #[inline]
    pub fn get(&self, parameter: &str) -> Option<&DifferentiationInterval> {
        self.by_parameter.get(parameter)
    }

    /// Returns the number of explicit intervals.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_parameter.len()
    }

    /// Returns true if no explicit intervals are set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_parameter.is_empty()
    }

    /// Iterates over `(parameter, interval)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DifferentiationInterval)> {
        self.by_parameter.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<S: Into<String>, I: Into<DifferentiationInterval>> FromIterator<(S, I)>
    for DifferentiationIntervals
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        let mut intervals = Self::new();
        for (parameter, interval) in iter {
            intervals.insert(parameter, interval);
        }
        intervals
    }
}

/// Relative interval width policy.
///
/// # Variants
///
/// - `Scalar(w)`: one width for every parameter
/// - `PerParameter`: named widths with an optional default
///
/// Serialises as a bare number or as a table whose `"default"` key holds the
/// fallback width.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::types::IntervalWidthPolicy;
///
/// let policy = IntervalWidthPolicy::per_parameter()
///     .with_width("x", 0.1)
///     .with_default(0.02);
///
/// assert_eq!(policy.named_width("x"), Some(0.1));
/// assert_eq!(policy.default_width(), Some(0.02));
/// assert_eq!(IntervalWidthPolicy::default(), IntervalWidthPolicy::Scalar(0.05));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "RawWidthPolicy", into = "RawWidthPolicy")
)]
pub enum IntervalWidthPolicy {
    /// Same relative width for every parameter.
    Scalar(f64),
    /// Relative width per parameter name.
    PerParameter {
        /// Widths keyed by parameter name
        widths: HashMap<String, f64>,
        /// Width for parameters without a named entry
        default: Option<f64>,
    },
}

impl Default for IntervalWidthPolicy {
    fn default() -> Self {
        IntervalWidthPolicy::Scalar(DEFAULT_INTERVAL_WIDTH)
    }
}

impl From<f64> for IntervalWidthPolicy {
    fn from(width: f64) -> Self {
        IntervalWidthPolicy::Scalar(width)
    }
}

impl IntervalWidthPolicy {
    /// Creates an empty per-parameter policy without default.
    pub fn per_parameter() -> Self {
        IntervalWidthPolicy::PerParameter {
            widths: HashMap::new(),
            default: None,
        }
    }

    /// Sets a named width.
    ///
    /// A `Scalar` policy becomes `PerParameter` with the scalar as default.
    pub fn with_width(self, parameter: impl Into<String>, width: f64) -> Self {
        let (mut widths, default) = self.into_parts();
        widths.insert(parameter.into(), width);
        IntervalWidthPolicy::PerParameter { widths, default }
    }

    /// Sets the default width.
    ///
    /// A `Scalar` policy is replaced by the new scalar.
    pub fn with_default(self, width: f64) -> Self {
        match self {
            IntervalWidthPolicy::Scalar(_) => IntervalWidthPolicy::Scalar(width),
            IntervalWidthPolicy::PerParameter { widths, .. } => IntervalWidthPolicy::PerParameter {
                widths,
                default: Some(width),
            },
        }
    }

    /// Returns the width explicitly named for a parameter.
    ///
    /// Always `None` for a `Scalar` policy.
    pub fn named_width(&self, parameter: &str) -> Option<f64> {
        match self {
            IntervalWidthPolicy::Scalar(_) => None,
            IntervalWidthPolicy::PerParameter { widths, .. } => widths.get(parameter).copied(),
        }
    }

    /// Returns the fallback width (the scalar itself for `Scalar`).
    pub fn default_width(&self) -> Option<f64> {
        match self {
            IntervalWidthPolicy::Scalar(w) => Some(*w),
            IntervalWidthPolicy::PerParameter { default, .. } => *default,
        }
    }

    /// Checks that every width is finite.
    pub fn validate(&self) -> Result<(), SensitivityError> {
        let check = |name: &str, w: f64| {
            if w.is_finite() {
                Ok(())
            } else {
                Err(SensitivityError::InvalidConfig(format!(
                    "interval width for {} must be finite, got {}",
                    name, w
                )))
            }
        };
        match self {
            IntervalWidthPolicy::Scalar(w) => check("all parameters", *w),
            IntervalWidthPolicy::PerParameter { widths, default } => {
                for (name, w) in widths {
                    check(name, *w)?;
                }
                match default {
                    Some(w) => check(DEFAULT_WIDTH_KEY, *w),
                    None => Ok(()),
                }
            }
        }
    }

    fn into_parts(self) -> (HashMap<String, f64>, Option<f64>) {
        match self {
            IntervalWidthPolicy::Scalar(w) => (HashMap::new(), Some(w)),
            IntervalWidthPolicy::PerParameter { widths, default } => (widths, default),
        }
    }
}

/// Wire form of [`IntervalWidthPolicy`].
#[cfg(feature = "serde")]
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawWidthPolicy {
    Scalar(f64),
    Table(HashMap<String, f64>),
}

#[cfg(feature = "serde")]
impl From<RawWidthPolicy> for IntervalWidthPolicy {
    fn from(raw: RawWidthPolicy) -> Self {
        match raw {
            RawWidthPolicy::Scalar(w) => IntervalWidthPolicy::Scalar(w),
            RawWidthPolicy::Table(mut widths) => {
                let default = widths.remove(DEFAULT_WIDTH_KEY);
                IntervalWidthPolicy::PerParameter { widths, default }
            }
        }
    }
}

#[cfg(feature = "serde")]
impl From<IntervalWidthPolicy> for RawWidthPolicy {
    fn from(policy: IntervalWidthPolicy) -> Self {
        match policy {
            IntervalWidthPolicy::Scalar(w) => RawWidthPolicy::Scalar(w),
            IntervalWidthPolicy::PerParameter {
                mut widths,
                default,
            } => {
                if let Some(w) = default {
                    widths.insert(DEFAULT_WIDTH_KEY.to_string(), w);
                }
                RawWidthPolicy::Table(widths)
            }
        }
    }
}
