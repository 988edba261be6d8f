//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Transport and logging configuration
    #[serde(default)]
    pub transport: TransportSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Status checking configuration
    #[serde(default)]
    pub status: StatusSection,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Transport configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportSection {
    /// Logging subsystem
    pub subsystem: Option<String>,

    /// Logging category
    pub category: Option<String>,

    /// Whole-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts, including the first one
    pub max_attempts: Option<u32>,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: Option<u64>,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,

    /// Only retry transient failures
    #[serde(default)]
    pub transient_only: bool,
}

/// Status checking configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusSection {
    /// Reject non-2xx responses
    pub check: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Blocks Configuration File
#
# Looked up at <config dir>/blocks/blocks.toml unless --config is given.

[transport]
# Subsystem and category attached to every request/response log event
# subsystem = "blocks"
# category = "Networking"

# Whole-request timeout in seconds (default: none)
# timeout_secs = 30

[retry]
# Maximum number of attempts including the first one (default: 3)
# 1 disables retrying
# max_attempts = 3

# Initial retry delay in milliseconds (default: 0, retry immediately)
# Non-zero values enable exponential backoff
# initial_delay_ms = 500

# Maximum retry delay in milliseconds (default: 60000)
# max_delay_ms = 60000

# Backoff multiplier (default: 2.0)
# multiplier = 2.0

# Only retry connection failures, timeouts, 408, 429 and 5xx responses
# transient_only = false

[status]
# Reject responses outside 200..=299 (default: true)
# check = true

# Headers sent with every request (CLI --header overrides)
[headers]
# User-Agent = "blocks"
"#
    .to_string()
}
