//! Analyse command implementation
//!
//! Runs the numerical and/or symbolic engine on a study file.

use std::path::Path;

use tracing::info;

use sensitivity_engine::{
    partial_derivatives, NumericalSensitivityEngine, SymbolicSensitivityEngine,
};

use crate::config::{Method, OutputFormat};
use crate::output::{render, Report};
use crate::study::Study;
use crate::Result;

/// Run the analyse command
pub fn run(study_path: &Path, method: Method, format: OutputFormat) -> Result<()> {
    info!("Starting analysis...");
    info!("  Study: {}", study_path.display());
    info!("  Method: {}", method);
    info!("  Output format: {}", format);

    let study = Study::load(study_path)?;
    let report = analyse(&study, method)?;

    let stdout = std::io::stdout();
    render(&mut stdout.lock(), &report, format)?;

    info!("Analysis complete");
    Ok(())
}

/// Runs the engines selected by `method` on `study`.
pub fn analyse(study: &Study, method: Method) -> Result<Report> {
    let values = study.parameter_set();
    let mut report = Report::default();

    if method.includes_numerical() {
        let engine = NumericalSensitivityEngine::new(study.numerical_config()?);
        let results = engine.evaluate(&study.compiled()?, &values)?;
        for name in results.nonlinear_parameters() {
            info!("  Nonlinear response: {}", name);
        }
        report.numerical = Some(results);
    }

    if method.includes_symbolic() {
        let expr = study.expression()?;
        let params = study.symbols();
        for (symbol, derivative) in partial_derivatives(&expr, &params) {
            info!("  d/d{} = {}", symbol, derivative);
        }
        let results =
            SymbolicSensitivityEngine::new().evaluate_expression(&expr, &params, &values)?;
        report.symbolic = Some(results);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn study(interval_width: &str) -> Study {
        Study::from_toml_str(&format!(
            "expression = \"(x*y + x^z)*w\"\n\
             [[parameters]]\nname = \"x\"\nvalue = 1.0\n\
             [[parameters]]\nname = \"y\"\nvalue = 2.0\n\
             [[parameters]]\nname = \"z\"\nvalue = 3.0\n\
             [[parameters]]\nname = \"w\"\nvalue = 4.0\n\
             [numerical]\ninterval_width = {}\n",
            interval_width
        ))
        .unwrap()
    }

    #[test]
    fn test_both_methods() {
        let report = analyse(&study("0.05"), Method::Both).unwrap();
        let numerical = report.numerical.unwrap();
        let symbolic = report.symbolic.unwrap();

        let expected = [("x", 20.0, 1.67), ("y", 4.0, 0.67), ("z", 0.0, 0.0), ("w", 3.0, 1.0)];
        for (name, absolute, relative) in expected {
            let s = numerical.get(name).unwrap();
            assert_eq!(s.absolute, absolute);
            assert_eq!(s.relative, relative);
            assert_relative_eq!(symbolic.get(name).unwrap().absolute, absolute, epsilon = 1e-12);
        }
        assert_eq!(numerical.nonlinear_parameters().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_parameter_named_e() {
        let study = Study::from_toml_str(
            "expression = \"a * e\"\n\
             [[parameters]]\nname = \"a\"\nvalue = 2.0\n\
             [[parameters]]\nname = \"e\"\nvalue = 10.0\n",
        )
        .unwrap();
        let report = analyse(&study, Method::Both).unwrap();
        let numerical = report.numerical.unwrap();
        let symbolic = report.symbolic.unwrap();

        assert_eq!(numerical.operating_output(), 20.0);
        assert_eq!(symbolic.operating_output(), 20.0);
        assert_eq!(numerical.get("e").unwrap().absolute, 2.0);
        assert_eq!(numerical.get("e").unwrap().relative, 1.0);
        assert_relative_eq!(symbolic.get("e").unwrap().absolute, 2.0);
        assert_relative_eq!(symbolic.get("e").unwrap().relative, 1.0);
    }

    #[test]
    fn test_symbolic_only() {
        let report = analyse(&study("0.05"), Method::Symbolic).unwrap();
        assert!(report.numerical.is_none());
        assert_eq!(report.symbolic.unwrap().len(), 4);
    }

    #[test]
    fn test_missing_width_surfaces() {
        let err = analyse(&study("{ x = 0.1 }"), Method::Numerical).unwrap_err();
        assert!(err.to_string().contains("parameter y"));
    }
}
