//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Blocks: composable HTTP transport pipeline
///
/// Sends requests through retry, status checking and logging stages,
/// and prints the response body.
#[derive(Debug, Parser)]
#[command(name = "blocks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for blocks
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a single request through the transport pipeline
    Curl(CurlArgs),

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "blocks.toml")]
        output: PathBuf,
    },
}

/// Arguments of the `curl` subcommand.
#[derive(Debug, Args)]
pub struct CurlArgs {
    /// Request URL
    pub url: String,

    /// HTTP method
    #[arg(long, short = 'X')]
    pub method: Option<String>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", short = 'H', value_name = "K=V")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Expected response type: json, xml or urlencoded
    #[arg(long)]
    pub accept: Option<String>,

    /// Maximum number of attempts, including the first one
    #[arg(long = "retry-max")]
    pub retry_max: Option<u32>,

    /// Initial retry delay in milliseconds (0 disables the delay)
    #[arg(long = "retry-delay-ms")]
    pub retry_delay_ms: Option<u64>,

    /// Accept any response status instead of only 2xx
    #[arg(long = "no-status-check")]
    pub no_status_check: bool,

    /// Print the status line and response headers before the body
    #[arg(long, short)]
    pub include: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }

    /// Returns the `curl` arguments, if that subcommand was given.
    #[must_use]
    pub const fn curl(&self) -> Option<&CurlArgs> {
        match &self.command {
            Command::Curl(args) => Some(args),
            Command::Init { .. } => None,
        }
    }
}
