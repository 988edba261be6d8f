//! `blocks`: send one HTTP request through the transport pipeline.
//!
//! `blocks curl <URL>` prints the response body, `blocks init` writes a
//! configuration template.

use std::path::Path;
use std::process::ExitCode;

use blocks_transport::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match &cli.command {
        Command::Init { output } => init(output),
        Command::Curl(_) => curl(&cli),
    }
}

fn init(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }

    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}

/// Validates the configuration, then runs the request on a single-threaded runtime.
///
/// Excluded from coverage - requires async runtime and network access.
#[cfg(not(tarpaulin_include))]
fn curl(cli: &Cli) -> ExitCode {
    let config = match ValidatedConfig::load(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) if e.is_cancelled() => {
            tracing::warn!("Request cancelled");
            exit_code::cancelled()
        }
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}
