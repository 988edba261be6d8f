//! Process-level helpers for `main`: exit codes, log setup and config hints.

use blocks_transport::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// 0: the response was printed, or the template was written.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// 1: the CLI or config file was rejected.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// 2: the request failed after leaving the pipeline.
    ///
    /// A function because `ExitCode::from` is not `const`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Cancelled by Ctrl+C or SIGTERM (exit code 130, as shells report SIGINT).
    pub fn cancelled() -> ExitCode {
        ExitCode::from(130)
    }
}

/// Follows a configuration error with a hint on stderr, when one helps.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'blocks init' to generate a configuration template.");
        }
        ConfigError::InvalidHeader { .. } => {
            eprintln!("\nHeaders are written as 'Key=Value' or 'Key: Value'.");
        }
        _ => {}
    }
}

/// Installs the global tracing subscriber.
///
/// INFO by default, DEBUG with `--verbose`; `RUST_LOG` wins over both.
/// Events go to stderr so stdout carries only the response.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
