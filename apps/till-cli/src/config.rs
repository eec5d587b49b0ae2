//! CLI configuration.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags
//! 2. Environment variables (`TILL_*`)
//! 3. Defaults (this file)
//!
//! `RUST_LOG`, when set, takes precedence over the log filter chosen here.

use std::env;
use std::path::PathBuf;

/// Default tracing filter when neither `RUST_LOG` nor `TILL_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// What the binary should print on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-width invoice text.
    #[default]
    Invoice,
    /// `CartTotals` as JSON.
    Totals,
}

/// Resolved command-line configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Scenario file; `None` or `-` reads stdin.
    pub scenario_path: Option<PathBuf>,

    /// Tracing filter directive.
    pub log_filter: String,

    pub output: OutputFormat,

    /// `--help` was given.
    pub help: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            scenario_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            output: OutputFormat::Invoice,
            help: false,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the process environment and `args`
    /// (without the program name).
    pub fn load<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Self::load_from(args, |key| env::var(key).ok())
    }

    /// Loads configuration with an explicit environment lookup.
    pub fn load_from<I, F>(args: I, lookup: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig::default();

        if let Some(filter) = lookup("TILL_LOG").filter(|value| !value.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(path) = lookup("TILL_SCENARIO").filter(|value| !value.trim().is_empty()) {
            config.scenario_path = Some(PathBuf::from(path));
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scenario" | "-s" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    config.scenario_path = Some(PathBuf::from(path));
                }
                "--log" | "-l" => {
                    config.log_filter = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                }
                "--totals" | "-t" => config.output = OutputFormat::Totals,
                "--help" | "-h" => config.help = true,
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        if config
            .scenario_path
            .as_ref()
            .is_some_and(|path| path.as_os_str() == "-")
        {
            config.scenario_path = None;
        }

        Ok(config)
    }
}

/// Usage text for `--help`.
pub const USAGE: &str = "\
Till - price a cart and print its invoice

Usage: till [OPTIONS]

Options:
  -s, --scenario <PATH>  Scenario JSON file, '-' for stdin (default: stdin)
  -l, --log <FILTER>     Tracing filter (default: info, env: TILL_LOG)
  -t, --totals           Print cart totals as JSON instead of the invoice
  -h, --help             Show this help message

Environment:
  TILL_SCENARIO          Scenario file when --scenario is not given
  TILL_LOG               Log filter when --log is not given
  RUST_LOG               Overrides every other log filter
";

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::load_from(Vec::new(), no_env).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_env_values() {
        let config = CliConfig::load_from(Vec::new(), |key| match key {
            "TILL_LOG" => Some("debug".to_string()),
            "TILL_SCENARIO" => Some("/tmp/cart.json".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.scenario_path, Some(PathBuf::from("/tmp/cart.json")));
    }

    #[test]
    fn test_flags_override_env() {
        let config = CliConfig::load_from(args(&["-s", "order.json", "--log", "warn", "-t"]), |key| {
            (key == "TILL_SCENARIO").then(|| "env.json".to_string())
        })
        .unwrap();

        assert_eq!(config.scenario_path, Some(PathBuf::from("order.json")));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.output, OutputFormat::Totals);
    }

    #[test]
    fn test_dash_means_stdin() {
        let config = CliConfig::load_from(args(&["--scenario", "-"]), no_env).unwrap();
        assert_eq!(config.scenario_path, None);
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(
            CliConfig::load_from(args(&["--scenario"]), no_env),
            Err(ConfigError::MissingValue("--scenario".to_string()))
        );
        assert_eq!(
            CliConfig::load_from(args(&["--verbose"]), no_env),
            Err(ConfigError::UnknownArgument("--verbose".to_string()))
        );
    }
}
