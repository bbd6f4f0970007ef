//! Check command implementation
//!
//! Validates a study file and shows the interval each parameter would be
//! differenced over, without evaluating the formula.

use std::path::Path;

use tracing::info;

use sensitivity_engine::interval::resolve_interval_with_source;

use crate::study::Study;
use crate::Result;

/// Run the check command
pub fn run(study_path: &Path) -> Result<()> {
    info!("Checking study {}", study_path.display());

    let study = Study::load(study_path)?;
    let rows = resolved_intervals(&study)?;

    println!("Expression: {}", study.expression()?);
    println!("Parameters: {}", rows.len());
    for row in &rows {
        println!(
            "  {:<10} value = {:<10} interval = [{}, {}] ({})",
            row.name, row.value, row.low, row.high, row.source
        );
    }
    if let Some(grid) = &study.grid {
        println!(
            "Grid: {} in [{}, {}] x {} in [{}, {}], {} steps",
            grid.x,
            grid.x_range[0],
            grid.x_range[1],
            grid.y,
            grid.y_range[0],
            grid.y_range[1],
            grid.steps
        );
    }
    println!("Study OK");
    Ok(())
}

/// Interval that the numerical engine would use for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalRow {
    /// Parameter name
    pub name: String,
    /// Operating value
    pub value: f64,
    /// Lower perturbed value
    pub low: f64,
    /// Upper perturbed value
    pub high: f64,
    /// Rule that produced the interval
    pub source: &'static str,
}

/// Resolves every parameter's interval in declaration order.
pub fn resolved_intervals(study: &Study) -> Result<Vec<IntervalRow>> {
    let config = study.numerical_config()?;
    let mut rows = Vec::with_capacity(study.parameters.len());
    for (name, value) in study.parameter_set().iter() {
        let (interval, source) = resolve_interval_with_source(
            name,
            value,
            config.intervals.get(name),
            &config.interval_width,
        )?;
        rows.push(IntervalRow {
            name: name.to_string(),
            value,
            low: interval.low,
            high: interval.high,
            source: source.as_str(),
        });
    }
    Ok(rows)
}
