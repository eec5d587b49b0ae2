//! # Till Command-Line Entry Point
//!
//! Prices one checkout scenario and prints the result.
//!
//! ## Usage
//! ```bash
//! # Invoice for a scenario file
//! cargo run -p till-cli -- --scenario ./cart.json
//!
//! # Same, reading the scenario from stdin
//! cat cart.json | cargo run -p till-cli
//!
//! # Totals as JSON, with debug logs on stderr
//! RUST_LOG=debug cargo run -p till-cli -- -s ./cart.json --totals
//! ```
//!
//! ## Startup Sequence
//! 1. Load configuration (flags, `TILL_*` env)
//! 2. Initialize tracing (stderr, so stdout carries only the result)
//! 3. Read and parse the scenario
//! 4. Register catalog, fill the cart, apply the coupon
//! 5. Print the invoice or the totals

mod config;
mod error;
mod scenario;

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use till_core::CartTotals;

use config::{CliConfig, OutputFormat, USAGE};
use error::{CliError, CliResult};
use scenario::Scenario;

fn main() -> ExitCode {
    let config = match CliConfig::load(env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", CliError::from(err));
            eprintln!();
            eprint!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    if config.help {
        print!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    init_tracing(&config.log_filter);

    match run(&config) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Checkout failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Runs one checkout and returns the text to print.
fn run(config: &CliConfig) -> CliResult<String> {
    let text = read_scenario(config)?;
    let scenario = Scenario::from_json(&text).map_err(|source| CliError::Parse {
        path: config.scenario_path.clone(),
        source,
    })?;

    let inventory = scenario.build_inventory()?;
    let cart = scenario.checkout(&inventory)?;

    match config.output {
        OutputFormat::Invoice => Ok(cart.invoice()),
        OutputFormat::Totals => {
            let totals = CartTotals::from(&cart);
            let mut json = serde_json::to_string_pretty(&totals).map_err(CliError::Encode)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn read_scenario(config: &CliConfig) -> CliResult<String> {
    let read_error = |source: io::Error| CliError::Read {
        path: config.scenario_path.clone(),
        source,
    };

    match &config.scenario_path {
        Some(path) => {
            debug!(path = %path.display(), "Reading scenario file");
            fs::read_to_string(path).map_err(read_error)
        }
        None => {
            debug!("Reading scenario from stdin");
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(read_error)?;
            Ok(text)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (registrations, cart updates)
/// - `RUST_LOG=till_core=trace` - Trace for the pricing core only
/// - Otherwise `--log` / `TILL_LOG`, default INFO
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
