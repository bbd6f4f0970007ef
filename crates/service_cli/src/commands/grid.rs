//! Grid command implementation
//!
//! Samples a study's formula over two of its parameters and exports the
//! grid as CSV, either to a file or to stdout.

use std::path::Path;

use tracing::info;

use sensitivity_grid::{slice_function, try_sample_grid, Grid};

use crate::study::Study;
use crate::{CliError, Result};

/// Run the grid command
pub fn run(study_path: &Path, output: Option<&Path>, steps: Option<usize>) -> Result<()> {
    info!("Starting grid sampling...");
    info!("  Study: {}", study_path.display());

    let study = Study::load(study_path)?;
    let grid = sample(&study, steps)?;

    match output {
        Some(path) => grid.save_csv(path)?,
        None => {
            let stdout = std::io::stdout();
            grid.write_csv(stdout.lock())?;
        }
    }

    if let Some((lo, hi)) = grid.z_range() {
        info!("  Output range: [{}, {}]", lo, hi);
    }
    info!("Grid sampling complete");
    Ok(())
}

/// Samples the `[grid]` section of `study`.
///
/// `steps` overrides the section's point count.
pub fn sample(study: &Study, steps: Option<usize>) -> Result<Grid> {
    let section = study
        .grid
        .as_ref()
        .ok_or_else(|| CliError::Study("study has no [grid] section".to_string()))?;
    let steps = steps.unwrap_or(section.steps);
    if steps == 0 {
        return Err(CliError::InvalidArgument("--steps must be at least 1".to_string()));
    }

    info!("  Axes: {} x {}", section.x, section.y);
    info!("  Steps: {}", steps);

    let function = study.compiled()?;
    let values = study.parameter_set();
    let slice = slice_function(&function, &values, &section.x, &section.y)?;
    let grid = try_sample_grid(
        |x, y| slice.evaluate(x, y),
        (section.x_range[0], section.x_range[1]),
        (section.y_range[0], section.y_range[1]),
        steps,
    )?;
    Ok(grid)
}
