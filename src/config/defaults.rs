//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;

/// Default HTTP method.
pub const METHOD: &str = "GET";

/// Default logging subsystem.
pub const SUBSYSTEM: &str = "blocks";

/// Default logging category.
pub const CATEGORY: &str = crate::transport::DEFAULT_CATEGORY;

/// Default maximum number of attempts, including the first one.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default initial retry delay in milliseconds. Zero retries immediately.
pub const RETRY_INITIAL_DELAY_MS: u64 = 0;

/// Default maximum retry delay in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 60_000;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Whether non-2xx responses are rejected by default.
pub const STATUS_CHECK: bool = true;

/// Directory name under the platform configuration directory.
pub const CONFIG_DIR_NAME: &str = "blocks";

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "blocks.toml";

/// Platform configuration file location, e.g. `~/.config/blocks/blocks.toml`.
///
/// Returns `None` when the platform has no configuration directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
