//! # sensitivity_grid: Grid Sampling of Parameter Slices
//!
//! ## Layer 3 Role
//!
//! sensitivity_grid samples a two-argument function over a rectangular
//! grid, the tabular input of a contour plot:
//! - Inclusive axes with `linspace` and `Grid { x, y, z }` (`grid`)
//! - Restriction of a multi-parameter target function to two free
//!   parameters (`slice`)
//! - CSV export with X as row index and Y as column header
//!
//! Rendering is left to external tools.
//!
//! ## Usage Example
//!
//! ```rust
//! use sensitivity_grid::{sample_grid, DEFAULT_STEPS};
//!
//! let grid = sample_grid(|x, y| x.powf(y), (0.1, 2.0), (0.1, 5.0), DEFAULT_STEPS).unwrap();
//! assert_eq!(grid.shape(), (100, 100));
//! assert_eq!(grid.z[99][0], 2.0f64.powf(0.1));
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod grid;
pub mod slice;

pub use error::{GridError, Result};
pub use grid::{linspace, sample_grid, try_sample_grid, Grid, DEFAULT_STEPS};
pub use slice::{slice_function, ParameterSlice};
