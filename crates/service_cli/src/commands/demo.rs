//! Demo command
//!
//! Analyses the bundled reference study `(x*y + x^z)*w` at
//! `x = 1, y = 2, z = 3, w = 4` with both engines.
//!
//! Expected numerical output (5% intervals):
//!
//! ```text
//! x  absolute 20  relative 1.67  (nonlinear, ratio 0.9418)
//! y  absolute 4   relative 0.67
//! z  absolute 0   relative 0
//! w  absolute 3   relative 1
//! ```

use tracing::info;

use crate::commands::analyse::analyse;
use crate::config::{Method, OutputFormat};
use crate::output::render;
use crate::study::Study;
use crate::Result;

/// Reference study shipped with the binary.
pub const REFERENCE_STUDY: &str = include_str!("../../studies/reference.toml");

/// Runs the demonstration.
pub fn run(format: OutputFormat) -> Result<()> {
    info!("Running reference study demo");

    let study = Study::from_toml_str(REFERENCE_STUDY)?;
    let report = analyse(&study, Method::Both)?;

    let stdout = std::io::stdout();
    render(&mut stdout.lock(), &report, format)?;
    Ok(())
}
