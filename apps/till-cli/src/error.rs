//! Error types for the Till CLI.

use std::path::PathBuf;

use till_core::CoreError;

use crate::config::ConfigError;

/// Everything that can stop a checkout run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", display_source(.path))]
    Read {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario in {}: {source}", display_source(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode totals: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

fn display_source(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    }
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;
