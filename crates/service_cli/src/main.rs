//! Sensitivity CLI - Command Line Operations for Local Sensitivity Studies
//!
//! # Commands
//!
//! - `sensitivity analyse --study <file>` - Compute sensitivities of a study's formula
//! - `sensitivity grid --study <file>` - Sample the formula over two parameters as CSV
//! - `sensitivity check --study <file>` - Validate a study and show its intervals
//! - `sensitivity demo` - Analyse the bundled reference study
//!
//! # Architecture
//!
//! As the service layer, this crate wires study files and configuration to
//! the engine and grid crates. Logs go to stderr; results go to stdout.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;
mod study;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, CliConfig, LogLevel, Method, OutputFormat};

/// Local sensitivity analysis CLI
#[derive(Parser)]
#[command(name = "sensitivity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration file path (default: ./sensitivity.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute local sensitivities of a study's formula
    Analyse {
        /// Path to study file (TOML or JSON)
        #[arg(short, long)]
        study: PathBuf,

        /// Engine to run (numerical, symbolic, both)
        #[arg(short, long)]
        method: Option<String>,

        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Sample the formula over the study's grid axes and export CSV
    Grid {
        /// Path to study file (TOML or JSON)
        #[arg(short, long)]
        study: PathBuf,

        /// Output CSV file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Points per axis, overriding the study
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Validate a study file
    Check {
        /// Path to study file (TOML or JSON)
        #[arg(short, long)]
        study: PathBuf,
    },

    /// Analyse the bundled reference study with both engines
    Demo {
        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<String>,
    },
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_or<T>(value: Option<&str>, fallback: T) -> Result<T>
where
    T: FromStr<Err = config::ConfigError>,
{
    match value {
        Some(v) => T::from_str(v).map_err(|e| CliError::InvalidArgument(e.to_string())),
        None => Ok(fallback),
    }
}

fn dispatch(command: Commands, config: &CliConfig) -> Result<()> {
    match command {
        Commands::Analyse {
            study,
            method,
            format,
        } => {
            let method: Method = parse_or(method.as_deref(), config.default_method)?;
            let format: OutputFormat = parse_or(format.as_deref(), config.default_format)?;
            commands::analyse::run(&study, method, format)
        }
        Commands::Grid {
            study,
            output,
            steps,
        } => commands::grid::run(&study, output.as_deref(), steps),
        Commands::Check { study } => commands::check::run(&study),
        Commands::Demo { format } => {
            let format: OutputFormat = parse_or(format.as_deref(), config.default_format)?;
            commands::demo::run(format)
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let args = CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        verbosity: cli.verbose,
    };
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_level);
    debug!(
        log_level = %config.log_level,
        format = %config.default_format,
        method = %config.default_method,
        "configuration loaded"
    );

    match dispatch(cli.command, &config) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
