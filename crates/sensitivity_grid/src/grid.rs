//! Rectangular grid sampling.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use sensitivity_core::traits::EvaluationFailure;

use crate::error::{GridError, Result};

/// Default number of points per axis.
pub const DEFAULT_STEPS: usize = 100;

/// `n` evenly spaced points from `low` to `high`, both included.
///
/// `n == 1` yields `[low]`; `n == 0` yields an empty vector.
///
/// # Examples
///
/// ```rust
/// use sensitivity_grid::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
/// ```
pub fn linspace(low: f64, high: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let step = (high - low) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| low + i as f64 * step).collect();
            points[n - 1] = high;
            points
        }
    }
}

/// Samples of `f(x, y)` over a rectangular grid.
///
/// `z[ix][iy] = f(x[ix], y[iy])`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// X axis
    pub x: Vec<f64>,
    /// Y axis
    pub y: Vec<f64>,
    /// One row per X value, one column per Y value
    pub z: Vec<Vec<f64>>,
}

impl Grid {
    /// Returns `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.x.len(), self.y.len())
    }

    /// Returns the sample at `(ix, iy)`.
    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        self.z.get(ix).and_then(|row| row.get(iy)).copied()
    }

    /// Returns the smallest and largest finite sample, if any.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.z
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Writes the grid as CSV.
    ///
    /// The header row is an empty cell followed by the Y values; each
    /// further row is an X value followed by its Z row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.y.len() + 1);
        header.push(String::new());
        header.extend(self.y.iter().map(f64::to_string));
        csv_writer.write_record(&header)?;

        for (x, row) in self.x.iter().zip(&self.z) {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(x.to_string());
            record.extend(row.iter().map(f64::to_string));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the grid as CSV to `path`, replacing any existing file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_csv(file)?;
        tracing::info!(
            path = %path.display(),
            rows = self.x.len(),
            columns = self.y.len(),
            "saved grid"
        );
        Ok(())
    }
}

/// Samples an infallible `f(x, y)`.
///
/// # Errors
///
/// Returns `GridError::InvalidSteps` if `n_steps` is zero.
///
/// # Examples
///
/// ```rust
/// use sensitivity_grid::sample_grid;
///
/// let grid = sample_grid(|x, y| x * y, (0.0, 1.0), (0.0, 2.0), 3).unwrap();
/// assert_eq!(grid.y, vec![0.0, 1.0, 2.0]);
/// assert_eq!(grid.z[2], vec![0.0, 1.0, 2.0]);
/// ```
pub fn sample_grid<F>(
    function: F,
    x_range: (f64, f64),
    y_range: (f64, f64),
    n_steps: usize,
) -> Result<Grid>
where
    F: Fn(f64, f64) -> f64,
{
    try_sample_grid(
        |x, y| Ok::<f64, EvaluationFailure>(function(x, y)),
        x_range,
        y_range,
        n_steps,
    )
}

/// Samples a fallible `f(x, y)`, stopping at the first failure.
///
/// # Errors
///
/// - `GridError::InvalidSteps` if `n_steps` is zero
/// - `GridError::Evaluation` naming the failing grid point
pub fn try_sample_grid<F, E>(
    function: F,
    x_range: (f64, f64),
    y_range: (f64, f64),
    n_steps: usize,
) -> Result<Grid>
where
    F: Fn(f64, f64) -> std::result::Result<f64, E>,
    E: Into<EvaluationFailure>,
{
    if n_steps == 0 {
        return Err(GridError::InvalidSteps(n_steps));
    }

    let x = linspace(x_range.0, x_range.1, n_steps);
    let y = linspace(y_range.0, y_range.1, n_steps);
    tracing::debug!(?x_range, ?y_range, n_steps, "sampling grid");

    let mut z = Vec::with_capacity(x.len());
    for &xv in &x {
        let mut row = Vec::with_capacity(y.len());
        for &yv in &y {
            let value = function(xv, yv).map_err(|e| GridError::Evaluation {
                x: xv,
                y: yv,
                source: e.into(),
            })?;
            row.push(value);
        }
        z.push(row);
    }

    Ok(Grid { x, y, z })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let points = linspace(0.1, 2.0, 100);
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], 0.1);
        assert_eq!(points[99], 2.0);
        assert_relative_eq!(points[1] - points[0], 1.9 / 99.0, epsilon = 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_descending_range() {
        assert_eq!(linspace(1.0, 0.0, 3), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_grid_indexing() {
        let grid = sample_grid(|x, y| 10.0 * x + y, (0.0, 2.0), (0.0, 1.0), 3).unwrap();
        assert_eq!(grid.shape(), (3, 3));
        for (ix, &x) in grid.x.iter().enumerate() {
            for (iy, &y) in grid.y.iter().enumerate() {
                assert_eq!(grid.get(ix, iy), Some(10.0 * x + y));
            }
        }
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_single_step_uses_low_end() {
        let grid = sample_grid(|x, y| x + y, (2.0, 5.0), (1.0, 9.0), 1).unwrap();
        assert_eq!(grid.x, vec![2.0]);
        assert_eq!(grid.y, vec![1.0]);
        assert_eq!(grid.z, vec![vec![3.0]]);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = sample_grid(|x, _| x, (0.0, 1.0), (0.0, 1.0), 0).unwrap_err();
        assert!(matches!(err, GridError::InvalidSteps(0)));
    }

    #[test]
    fn test_failure_names_point() {
        let err = try_sample_grid(
            |x, y| if x > 0.5 { Err("too large") } else { Ok(x + y) },
            (0.0, 1.0),
            (0.0, 1.0),
            3,
        )
        .unwrap_err();
        match err {
            GridError::Evaluation { x, y, .. } => {
                assert_eq!(x, 1.0);
                assert_eq!(y, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_z_range_skips_non_finite() {
        let grid = sample_grid(|x, y| (x - y).ln(), (1.0, 3.0), (1.0, 2.0), 3).unwrap();
        let (lo, hi) = grid.z_range().unwrap();
        assert_relative_eq!(lo, 0.5f64.ln());
        assert_relative_eq!(hi, 2f64.ln());
    }

    #[test]
    fn test_csv_layout() {
        let grid = sample_grid(|x, y| x * 10.0 + y, (1.0, 2.0), (0.0, 0.5), 2).unwrap();
        let mut buffer = Vec::new();
        grid.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, ",0,0.5\n1,10,10.5\n2,20,20.5\n");
    }
}
