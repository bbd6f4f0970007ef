//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`SENSITIVITY_LOG_LEVEL`, `SENSITIVITY_FORMAT`,
//!    `SENSITIVITY_METHOD`)
//! 3. Config file (`--config`, else `sensitivity.toml` if present)
//! 4. Default values

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "sensitivity.toml";

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "SENSITIVITY_LOG_LEVEL";

/// Environment variable overriding the default output format.
pub const ENV_FORMAT: &str = "SENSITIVITY_FORMAT";

/// Environment variable overriding the default method.
pub const ENV_METHOD: &str = "SENSITIVITY_METHOD";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Invalid method: {0}. Must be one of: numerical, symbolic, both")]
    InvalidMethod(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// One step more verbose, saturating at `Trace`
    pub fn more_verbose(self) -> Self {
        match self {
            LogLevel::Error => LogLevel::Warn,
            LogLevel::Warn => LogLevel::Info,
            LogLevel::Info => LogLevel::Debug,
            LogLevel::Debug | LogLevel::Trace => LogLevel::Trace,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Which engines an analysis runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Numerical,
    Symbolic,
    Both,
}

impl Method {
    /// Whether the numerical engine runs
    pub fn includes_numerical(&self) -> bool {
        matches!(self, Method::Numerical | Method::Both)
    }

    /// Whether the symbolic engine runs
    pub fn includes_symbolic(&self) -> bool {
        matches!(self, Method::Symbolic | Method::Both)
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "numerical" | "numeric" => Ok(Method::Numerical),
            "symbolic" => Ok(Method::Symbolic),
            "both" => Ok(Method::Both),
            _ => Err(ConfigError::InvalidMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Numerical => write!(f, "numerical"),
            Method::Symbolic => write!(f, "symbolic"),
            Method::Both => write!(f, "both"),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_parsed")]
    pub log_level: LogLevel,
    /// Output format when `--format` is not given
    #[serde(deserialize_with = "deserialize_parsed")]
    pub default_format: OutputFormat,
    /// Engine selection when `--method` is not given
    #[serde(deserialize_with = "deserialize_parsed")]
    pub default_method: Method,
}

fn deserialize_parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply environment overrides read through `lookup`
    ///
    /// Only variables that are set are applied.
    pub fn apply_env<L>(&mut self, lookup: L) -> Result<(), ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.default_format = OutputFormat::from_str(&format)?;
        }
        if let Some(method) = lookup(ENV_METHOD) {
            self.default_method = Method::from_str(&method)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        for _ in 0..cli.verbosity {
            self.log_level = self.log_level.more_verbose();
        }
        Ok(())
    }
}

/// Configuration-relevant CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Number of `-v` flags
    pub verbosity: u8,
}

/// Build configuration from all sources
///
/// An explicit `config_file` must exist; the default `sensitivity.toml` is
/// optional.
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// Like [`build_config`] with a custom environment lookup
pub fn build_config_with_env<L>(cli: &CliArgs, lookup: L) -> Result<CliConfig, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.default_format, OutputFormat::Table);
        assert_eq!(config.default_method, Method::Numerical);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert!(LogLevel::from_str("loud").is_err());
        assert_eq!(OutputFormat::from_str("Json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("xml").is_err());
        assert_eq!(Method::from_str("both").unwrap(), Method::Both);
        assert!(Method::Both.includes_numerical() && Method::Both.includes_symbolic());
        assert!(!Method::Symbolic.includes_numerical());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = CliConfig::from_toml("default_format = \"csv\"\n").unwrap();
        assert_eq!(config.default_format, OutputFormat::Csv);
        assert_eq!(config.log_level, LogLevel::Warn);

        assert!(CliConfig::from_toml("log_level = \"noisy\"\n").is_err());
    }

    #[test]
    fn test_precedence_file_env_cli() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"error\"\ndefault_format = \"json\"\ndefault_method = \"both\""
        )
        .unwrap();

        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            log_level: None,
            verbosity: 0,
        };
        let config = build_config_with_env(&cli, env(&[(ENV_FORMAT, "csv")])).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.default_format, OutputFormat::Csv);
        assert_eq!(config.default_method, Method::Both);

        let cli = CliArgs {
            log_level: Some("info".to_string()),
            verbosity: 1,
            ..cli
        };
        let config =
            build_config_with_env(&cli, env(&[(ENV_LOG_LEVEL, "trace")])).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/sensitivity.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, env(&[])),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = CliConfig::default();
        assert!(config.apply_env(env(&[(ENV_METHOD, "guess")])).is_err());
    }
}
