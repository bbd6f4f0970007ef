//! Two-parameter slices of multi-parameter target functions.

use sensitivity_core::traits::{EvaluationFailure, TargetFunction};
use sensitivity_core::types::ParameterSet;

use crate::error::{GridError, Result};

/// A target function restricted to two free parameters.
///
/// Every other parameter is held at its operating-point value.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::traits::from_fn;
/// use sensitivity_core::types::ParameterSet;
/// use sensitivity_grid::{slice_function, try_sample_grid};
///
/// let f = from_fn(|p: &[f64]| (p[0] * p[1] + p[0].powf(p[2])) * p[3]);
/// let values: ParameterSet = [("x", 1.0), ("y", 2.0), ("z", 3.0), ("w", 4.0)]
///     .into_iter()
///     .collect();
///
/// let slice = slice_function(&f, &values, "x", "z").unwrap();
/// assert_eq!(slice.evaluate(1.0, 3.0).unwrap(), 12.0);
///
/// let grid = try_sample_grid(|x, z| slice.evaluate(x, z), (0.5, 1.5), (1.0, 3.0), 5).unwrap();
/// assert_eq!(grid.shape(), (5, 5));
/// ```
#[derive(Debug)]
pub struct ParameterSlice<'a, F: ?Sized> {
    function: &'a F,
    base: Vec<f64>,
    x_index: usize,
    y_index: usize,
}

impl<'a, F> ParameterSlice<'a, F>
where
    F: TargetFunction + ?Sized,
{
    /// Evaluates the function with the two free parameters set to `x` and `y`.
    pub fn evaluate(&self, x: f64, y: f64) -> std::result::Result<f64, EvaluationFailure> {
        let mut args = self.base.clone();
        args[self.x_index] = x;
        args[self.y_index] = y;
        self.function.evaluate(&args)
    }

    /// Returns the positional indices of the free parameters.
    #[inline]
    pub fn indices(&self) -> (usize, usize) {
        (self.x_index, self.y_index)
    }
}

/// Restricts `function` to the parameters `x_name` and `y_name`.
///
/// # Errors
///
/// - `GridError::UnknownParameter` if a name is not in `values`
/// - `GridError::DuplicateAxis` if both names are the same
pub fn slice_function<'a, F>(
    function: &'a F,
    values: &ParameterSet,
    x_name: &str,
    y_name: &str,
) -> Result<ParameterSlice<'a, F>>
where
    F: TargetFunction + ?Sized,
{
    if x_name == y_name {
        return Err(GridError::DuplicateAxis(x_name.to_string()));
    }
    let index_of = |name: &str| {
        values
            .position(name)
            .ok_or_else(|| GridError::UnknownParameter(name.to_string()))
    };
    Ok(ParameterSlice {
        function,
        base: values.values(),
        x_index: index_of(x_name)?,
        y_index: index_of(y_name)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensitivity_core::traits::from_fn;

    fn values() -> ParameterSet {
        ParameterSet::new().with("a", 1.0).with("b", 2.0).with("c", 3.0)
    }

    #[test]
    fn test_other_parameters_held_fixed() {
        let f = from_fn(|p: &[f64]| 100.0 * p[0] + 10.0 * p[1] + p[2]);
        let values = values();
        let slice = slice_function(&f, &values, "c", "a").unwrap();
        assert_eq!(slice.indices(), (2, 0));
        // a = 7, b = 2 (fixed), c = 5
        assert_eq!(slice.evaluate(5.0, 7.0).unwrap(), 725.0);
    }

    #[test]
    fn test_unknown_parameter() {
        let f = from_fn(|p: &[f64]| p[0]);
        let err = slice_function(&f, &values(), "a", "q").unwrap_err();
        assert!(matches!(err, GridError::UnknownParameter(name) if name == "q"));
    }

    #[test]
    fn test_duplicate_axis() {
        let f = from_fn(|p: &[f64]| p[0]);
        let err = slice_function(&f, &values(), "b", "b").unwrap_err();
        assert!(matches!(err, GridError::DuplicateAxis(_)));
    }
}
