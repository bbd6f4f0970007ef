//! Study files
//!
//! A study names a formula, its operating point and optional interval and
//! grid settings. TOML is the primary format; files ending in `.json` are
//! read as JSON.
//!
//! ```toml
//! expression = "(x*y + x^z)*w"
//!
//! [[parameters]]
//! name = "x"
//! value = 1.0
//! interval = [0.9, 1.1]     # optional explicit bounds
//!
//! [numerical]
//! interval_width = 0.05     # or { x = 0.1, default = 0.05 }
//!
//! [grid]
//! x = "x"
//! y = "z"
//! x_range = [0.5, 1.5]
//! y_range = [1.0, 3.0]
//! steps = 100
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use sensitivity_core::symbolic::{
    parse_expression, CompiledExpression, Expr, Symbol, RESERVED_CONSTANTS,
};
use sensitivity_core::types::{
    DifferentiationInterval, DifferentiationIntervals, IntervalWidthPolicy, ParameterSet,
};
use sensitivity_engine::NumericalConfig;
use sensitivity_grid::DEFAULT_STEPS;

use crate::{CliError, Result};

/// One parameter of a study
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name as used in the expression
    pub name: String,
    /// Operating-point value
    pub value: f64,
    /// Explicit `[low, high]` bounds; empty means "use the width policy"
    #[serde(default)]
    pub interval: Vec<f64>,
}

/// Numerical engine settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NumericalSection {
    /// Relative width policy
    pub interval_width: IntervalWidthPolicy,
}

/// Two-parameter grid settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridSection {
    /// Parameter on the X axis
    pub x: String,
    /// Parameter on the Y axis
    pub y: String,
    /// X axis bounds
    pub x_range: [f64; 2],
    /// Y axis bounds
    pub y_range: [f64; 2],
    /// Points per axis
    #[serde(default = "default_steps")]
    pub steps: usize,
}

fn default_steps() -> usize {
    DEFAULT_STEPS
}

/// A parsed study file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Study {
    /// Formula text
    pub expression: String,
    /// Parameters in positional order
    pub parameters: Vec<ParameterSpec>,
    /// Numerical engine settings
    #[serde(default)]
    pub numerical: NumericalSection,
    /// Optional grid settings
    #[serde(default)]
    pub grid: Option<GridSection>,
}

impl Study {
    /// Loads and validates a study file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let study = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        debug!(
            path = %path.display(),
            parameters = study.parameters.len(),
            "loaded study"
        );
        Ok(study)
    }

    /// Parses and validates TOML study text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let study: Study =
            toml::from_str(content).map_err(|e| CliError::Study(e.to_string()))?;
        study.validate()?;
        Ok(study)
    }

    /// Parses and validates JSON study text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let study: Study = serde_json::from_str(content)?;
        study.validate()?;
        Ok(study)
    }

    /// Checks names, intervals, grid axes and that the expression only
    /// uses declared parameters.
    pub fn validate(&self) -> Result<()> {
        if self.parameters.is_empty() {
            return Err(CliError::Study("at least one parameter is required".into()));
        }

        let mut seen = HashSet::new();
        for spec in &self.parameters {
            if spec.name.trim().is_empty() {
                return Err(CliError::Study("parameter names must not be empty".into()));
            }
            if RESERVED_CONSTANTS.contains(&spec.name.as_str()) {
                return Err(CliError::Study(format!(
                    "parameter name {} is reserved for a constant",
                    spec.name
                )));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(CliError::Study(format!("duplicate parameter: {}", spec.name)));
            }
            DifferentiationInterval::from_slice(&spec.interval)?;
        }

        self.compiled()?;

        if let Some(grid) = &self.grid {
            for axis in [&grid.x, &grid.y] {
                if !seen.contains(axis.as_str()) {
                    return Err(CliError::Study(format!("unknown grid parameter: {}", axis)));
                }
            }
            if grid.x == grid.y {
                return Err(CliError::Study(format!(
                    "grid axes must differ, both are {}",
                    grid.x
                )));
            }
            if grid.steps == 0 {
                return Err(CliError::Study("grid steps must be at least 1".into()));
            }
        }

        Ok(())
    }

    /// Operating point in declaration order.
    pub fn parameter_set(&self) -> ParameterSet {
        self.parameters
            .iter()
            .map(|spec| (spec.name.as_str(), spec.value))
            .collect()
    }

    /// Parameter symbols in declaration order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.parameters
            .iter()
            .map(|spec| Symbol::new(spec.name.as_str()))
            .collect()
    }

    /// Explicit intervals of the parameters that declare one.
    pub fn intervals(&self) -> Result<DifferentiationIntervals> {
        let mut intervals = DifferentiationIntervals::new();
        for spec in &self.parameters {
            if let Some(interval) = DifferentiationInterval::from_slice(&spec.interval)? {
                intervals.insert(spec.name.as_str(), interval);
            }
        }
        Ok(intervals)
    }

    /// Numerical engine configuration for this study.
    pub fn numerical_config(&self) -> Result<NumericalConfig> {
        let config = NumericalConfig::new()
            .with_interval_width(self.numerical.interval_width.clone())
            .with_differentiation_intervals(self.intervals()?);
        config.validate()?;
        Ok(config)
    }

    /// The parsed formula.
    pub fn expression(&self) -> Result<Expr> {
        Ok(parse_expression(&self.expression)?)
    }

    /// The formula bound to the declared parameter order.
    pub fn compiled(&self) -> Result<CompiledExpression> {
        Ok(CompiledExpression::parse(&self.expression, self.symbols())?)
    }
}
