//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong before a request is sent.
///
/// Raised while reading the config file, merging it with the CLI,
/// or writing the `init` template.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// File that was read
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `blocks init` could not write the template.
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Destination path
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The command needs a value that neither the CLI nor the config file gave.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Missing field
        field: &'static str,
        /// How to supply it
        hint: &'static str,
    },

    /// The request URL does not parse.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as given
        url: String,
        /// Parser message
        reason: String,
    },

    /// Retry settings are out of range or inconsistent.
    #[error("Invalid retry configuration: {0}")]
    InvalidRetry(String),

    /// The method is not a valid HTTP token.
    #[error("Invalid HTTP method '{0}'")]
    InvalidMethod(String),

    /// Invalid content type for `--accept`.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// Invalid timeout value.
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    /// A header is malformed, or its name or value is not valid HTTP.
    #[error("Invalid header '{value}': {reason}")]
    InvalidHeader {
        /// Header as given, or its name
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Field names reported by `MissingRequired`.
pub mod field {
    /// The request URL field.
    pub const URL: &str = "url";
}

impl ConfigError {
    /// Shorthand for [`ConfigError::MissingRequired`].
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
