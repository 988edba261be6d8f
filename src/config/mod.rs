//! Configuration layer for the `blocks` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`], [`CurlArgs`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`], [`RetrySettings`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Headers are merged: TOML `[headers]` are applied first, then every
//! `--header` in order, so a CLI header replaces a TOML header of the same name.
//!
//! # Config File Location
//!
//! `--config <path>` is read when given. Otherwise `<config dir>/blocks/blocks.toml`
//! is read if it exists, and built-in defaults apply if it does not.
//!
//! # TOML-Only Options
//!
//! Some options are not available via CLI:
//! - `transport.subsystem`, `transport.category` - Logging labels
//! - `transport.timeout_secs` - Whole-request timeout
//! - `retry.max_delay_ms` (default: 60000) - Maximum retry delay
//! - `retry.multiplier` (default: 2.0) - Exponential backoff multiplier
//! - `retry.transient_only` - Restrict retries to transient failures

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command, CurlArgs};
pub use error::{ConfigError, field};
pub use toml::{
    RetrySection, StatusSection, TomlConfig, TransportSection, default_config_template,
};
pub use validated::{RetrySettings, ValidatedConfig, write_default_config};
