//! Result types shared by the numerical and symbolic engines.

use std::fmt;
use std::str::FromStr;

use sensitivity_core::types::DifferentiationInterval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute and relative sensitivity of the output to one parameter.
///
/// - `absolute`: ∂f/∂p at the operating point
/// - `relative`: `absolute · v / f(op)`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sensitivity {
    /// First-order derivative estimate
    pub absolute: f64,
    /// Unitless scaled sensitivity
    pub relative: f64,
}

impl Sensitivity {
    /// Creates a sensitivity pair.
    #[inline]
    pub fn new(absolute: f64, relative: f64) -> Self {
        Self { absolute, relative }
    }
}

/// Outcome of the linearity diagnostic for one parameter.
///
/// `ratio = (f(op) − f(low)) / (f(high) − f(op))`; a symmetric (linear)
/// response gives 1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearityCheck {
    /// Parameter the check refers to
    pub parameter: String,
    /// Unrounded ratio
    pub ratio: f64,
    /// Whether the ratio rounds to 1 at five decimals
    pub is_linear: bool,
}

/// How the sensitivities were obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SensitivityMethod {
    /// Central finite differences
    #[default]
    Numerical,
    /// Exact symbolic differentiation
    Symbolic,
}

impl fmt::Display for SensitivityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityMethod::Numerical => write!(f, "numerical"),
            SensitivityMethod::Symbolic => write!(f, "symbolic"),
        }
    }
}

impl FromStr for SensitivityMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "numerical" | "numeric" => Ok(SensitivityMethod::Numerical),
            "symbolic" => Ok(SensitivityMethod::Symbolic),
            _ => Err(format!("Unknown sensitivity method: {}", s)),
        }
    }
}

/// Per-parameter sensitivities in input order.
///
/// Numerical results additionally carry one [`LinearityCheck`] and the
/// resolved interval per parameter; symbolic results carry neither.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensitivityResults {
    method: SensitivityMethod,
    operating_output: f64,
    entries: Vec<(String, Sensitivity)>,
    linearity: Vec<LinearityCheck>,
    intervals: Vec<(String, DifferentiationInterval)>,
}

impl SensitivityResults {
    /// Creates an empty result set.
    pub fn new(method: SensitivityMethod, operating_output: f64) -> Self {
        Self {
            method,
            operating_output,
            entries: Vec::new(),
            linearity: Vec::new(),
            intervals: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, parameter: &str, sensitivity: Sensitivity) {
        self.entries.push((parameter.to_string(), sensitivity));
    }

    pub(crate) fn push_diagnostics(
        &mut self,
        check: LinearityCheck,
        interval: DifferentiationInterval,
    ) {
        self.intervals.push((check.parameter.clone(), interval));
        self.linearity.push(check);
    }

    /// Returns the method that produced these results.
    #[inline]
    pub fn method(&self) -> SensitivityMethod {
        self.method
    }

    /// Returns f(operating point).
    #[inline]
    pub fn operating_output(&self) -> f64 {
        self.operating_output
    }

    /// Returns the sensitivity of a parameter.
    pub fn get(&self, parameter: &str) -> Option<&Sensitivity> {
        self.entries
            .iter()
            .find(|(name, _)| name == parameter)
            .map(|(_, s)| s)
    }

    /// Iterates over `(parameter, sensitivity)` in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Sensitivity)> {
        self.entries.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Iterates over parameter names in input order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the linearity checks (empty for symbolic results).
    #[inline]
    pub fn linearity_checks(&self) -> &[LinearityCheck] {
        &self.linearity
    }

    /// Returns the linearity check of a parameter.
    pub fn linearity(&self, parameter: &str) -> Option<&LinearityCheck> {
        self.linearity.iter().find(|c| c.parameter == parameter)
    }

    /// Iterates over the parameters that failed the linearity check.
    pub fn nonlinear_parameters(&self) -> impl Iterator<Item = &str> {
        self.linearity
            .iter()
            .filter(|c| !c.is_linear)
            .map(|c| c.parameter.as_str())
    }

    /// Returns the resolved interval of a parameter (numerical results only).
    pub fn interval(&self, parameter: &str) -> Option<&DifferentiationInterval> {
        self.intervals
            .iter()
            .find(|(name, _)| name == parameter)
            .map(|(_, i)| i)
    }
}

impl<'a> IntoIterator for &'a SensitivityResults {
    type Item = &'a (String, Sensitivity);
    type IntoIter = std::slice::Iter<'a, (String, Sensitivity)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
