//! Positional target-function contract.

use std::fmt;

/// Boxed failure reported by a target function.
pub type EvaluationFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Scalar function of positional parameters.
///
/// `args` holds one value per parameter in `ParameterSet` insertion order.
///
/// Implemented for every closure `Fn(&[f64]) -> Result<f64, E>` whose error
/// converts into [`EvaluationFailure`] (including `String` and `&str`).
/// Use [`from_fn`] for closures that cannot fail.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::traits::TargetFunction;
///
/// let checked_ln = |args: &[f64]| -> Result<f64, String> {
///     if args[0] <= 0.0 {
///         return Err(format!("ln undefined at {}", args[0]));
///     }
///     Ok(args[0].ln())
/// };
///
/// assert!(checked_ln.evaluate(&[1.0]).is_ok());
/// assert!(checked_ln.evaluate(&[-1.0]).is_err());
/// ```
pub trait TargetFunction {
    /// Evaluates the function at a positional argument vector.
    fn evaluate(&self, args: &[f64]) -> Result<f64, EvaluationFailure>;
}

impl<F, E> TargetFunction for F
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: Into<EvaluationFailure>,
{
    #[inline]
    fn evaluate(&self, args: &[f64]) -> Result<f64, EvaluationFailure> {
        self(args).map_err(Into::into)
    }
}

/// Adapter making an infallible closure a [`TargetFunction`].
#[derive(Clone, Copy)]
pub struct FnFunction<F>(F);

impl<F> fmt::Debug for FnFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFunction")
    }
}

impl<F> TargetFunction for FnFunction<F>
where
    F: Fn(&[f64]) -> f64,
{
    #[inline]
    fn evaluate(&self, args: &[f64]) -> Result<f64, EvaluationFailure> {
        Ok((self.0)(args))
    }
}

/// Wraps an infallible closure.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::traits::{from_fn, TargetFunction};
///
/// let f = from_fn(|p: &[f64]| (p[0] * p[1] + p[0].powf(p[2])) * p[3]);
/// assert_eq!(f.evaluate(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 12.0);
/// ```
#[inline]
pub fn from_fn<F>(f: F) -> FnFunction<F>
where
    F: Fn(&[f64]) -> f64,
{
    FnFunction(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Overflow;

    impl fmt::Display for Overflow {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "overflow")
        }
    }

    impl std::error::Error for Overflow {}

    #[test]
    fn test_closure_with_custom_error() {
        let f = |args: &[f64]| -> Result<f64, Overflow> {
            if args[0] > 1e6 {
                Err(Overflow)
            } else {
                Ok(args[0] * 2.0)
            }
        };
        assert_eq!(f.evaluate(&[2.0]).unwrap(), 4.0);
        assert_eq!(f.evaluate(&[1e7]).unwrap_err().to_string(), "overflow");
    }

    #[test]
    fn test_from_fn_never_fails() {
        let f = from_fn(|args: &[f64]| args.iter().sum());
        assert_eq!(f.evaluate(&[1.0, 2.0, 3.0]).unwrap(), 6.0);
    }

    #[test]
    fn test_trait_object() {
        let f = from_fn(|args: &[f64]| args[0]);
        let dynamic: &dyn TargetFunction = &f;
        assert_eq!(dynamic.evaluate(&[7.0]).unwrap(), 7.0);
    }
}
