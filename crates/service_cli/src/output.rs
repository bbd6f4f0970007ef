//! Rendering of analysis results
//!
//! Results go to stdout; logs go to stderr so JSON and CSV stay clean.

use std::io::Write;

use serde::Serialize;
use sensitivity_engine::SensitivityResults;

use crate::config::OutputFormat;
use crate::Result;

/// Results of one `analyse` run, one entry per engine that ran.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Central-difference results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerical: Option<SensitivityResults>,
    /// Exact-derivative results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbolic: Option<SensitivityResults>,
}

impl Report {
    /// Iterates over the results that are present, numerical first.
    pub fn results(&self) -> impl Iterator<Item = &SensitivityResults> {
        self.numerical.iter().chain(self.symbolic.iter())
    }
}

/// Writes `report` in the requested format.
pub fn render<W: Write>(out: &mut W, report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(out, report),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => render_csv(out, report),
    }
}

fn render_table<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    for (i, results) in report.results().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "Method: {}  f(op) = {}",
            results.method(),
            results.operating_output()
        )?;
        writeln!(out, "┌────────────┬──────────────┬──────────────┬──────────────┐")?;
        writeln!(out, "│ Parameter  │ Absolute     │ Relative     │ Linear       │")?;
        writeln!(out, "├────────────┼──────────────┼──────────────┼──────────────┤")?;
        for (name, s) in results {
            let linear = match results.linearity(name) {
                Some(check) if check.is_linear => "yes".to_string(),
                Some(check) => format!("no ({:.4})", check.ratio),
                None => "-".to_string(),
            };
            writeln!(
                out,
                "│ {:<10} │ {:<12} │ {:<12} │ {:<12} │",
                name,
                s.absolute.to_string(),
                s.relative.to_string(),
                linear
            )?;
        }
        writeln!(out, "└────────────┴──────────────┴──────────────┴──────────────┘")?;
    }
    Ok(())
}

fn render_csv<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "method",
        "parameter",
        "absolute",
        "relative",
        "linearity_ratio",
        "is_linear",
    ])?;
    for results in report.results() {
        for (name, s) in results {
            let (ratio, is_linear) = match results.linearity(name) {
                Some(check) => (check.ratio.to_string(), check.is_linear.to_string()),
                None => (String::new(), String::new()),
            };
            writer.write_record([
                results.method().to_string(),
                name.to_string(),
                s.absolute.to_string(),
                s.relative.to_string(),
                ratio,
                is_linear,
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
