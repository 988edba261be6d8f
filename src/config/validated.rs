//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::{HeaderMap, Method};
use url::Url;

use crate::endpoint::{ContentType, EndpointBuilder, HeaderItem};
use crate::transport::ExponentialBackoff;
use crate::transport::retry::{self, CanRetry};

use super::cli::{Cli, CurlArgs};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Retry behaviour resolved from CLI and TOML.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrySettings {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,

    /// Backoff between attempts; `None` retries immediately
    pub backoff: Option<ExponentialBackoff>,

    /// Only retry transient failures
    pub transient_only: bool,
}

impl RetrySettings {
    /// Builds the retry predicate for these settings.
    #[must_use]
    pub fn can_retry(&self) -> CanRetry {
        if self.transient_only {
            retry::transient_only(self.max_attempts)
        } else {
            retry::max_attempts(self.max_attempts)
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Request URL
    pub url: Url,

    /// HTTP method
    pub method: Method,

    /// Header items in application order (TOML first, then CLI)
    pub headers: Vec<HeaderItem>,

    /// Request body
    pub body: Option<Vec<u8>>,

    /// Expected response type
    pub accept: Option<ContentType>,

    /// Logging subsystem
    pub subsystem: String,

    /// Logging category
    pub category: String,

    /// Whole-request timeout
    pub timeout: Option<Duration>,

    /// Retry behaviour
    pub retry: RetrySettings,

    /// Whether non-2xx responses are rejected
    pub status_check: bool,

    /// Print the status line and headers before the body
    pub include: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delay = self
            .retry
            .backoff
            .as_ref()
            .map_or(0, |b| b.initial_delay.as_millis());

        write!(
            f,
            "Config {{ request: {} {}, headers: {}, subsystem: {}, category: {}, \
             retry: {}x/{}ms, transient_only: {}, status_check: {} }}",
            self.method,
            self.url,
            self.headers.len(),
            self.subsystem,
            self.category,
            self.retry.max_attempts,
            delay,
            self.retry.transient_only,
            self.status_check,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command is not `curl`
    /// - URL, method, accept type or a header is invalid
    /// - Retry settings are inconsistent
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let args = cli.curl().ok_or_else(|| {
            ConfigError::missing(field::URL, "Use 'blocks curl <URL>' to send a request")
        })?;

        let url = parse_url(&args.url)?;
        let method = Self::resolve_method(args)?;
        let headers = Self::resolve_headers(args, toml)?;
        let accept = Self::resolve_accept(args)?;
        let timeout = Self::resolve_timeout(toml)?;
        let retry = Self::build_retry_settings(args, toml)?;

        let transport = toml.map(|t| &t.transport);
        let subsystem = transport
            .and_then(|t| t.subsystem.clone())
            .unwrap_or_else(|| defaults::SUBSYSTEM.to_string());
        let category = transport
            .and_then(|t| t.category.clone())
            .unwrap_or_else(|| defaults::CATEGORY.to_string());

        // The flag can only disable checking
        let status_check = !args.no_status_check
            && toml
                .and_then(|t| t.status.check)
                .unwrap_or(defaults::STATUS_CHECK);

        Ok(Self {
            url,
            method,
            headers,
            body: args.data.clone().map(String::into_bytes),
            accept,
            subsystem,
            category,
            timeout,
            retry,
            status_check,
            include: args.include,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// Reads `cli.config` if set, otherwise the platform default path
    /// ([`defaults::config_path`]) when that file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = match config_file(cli.config.as_deref(), defaults::config_path()) {
            Some(path) => Some(TomlConfig::load(&path)?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Starts an endpoint builder for the configured request.
    #[must_use]
    pub fn endpoint_builder(&self) -> EndpointBuilder {
        let mut builder = EndpointBuilder::new(self.method.clone(), self.url.clone())
            .headers(self.headers.iter().cloned());

        if let Some(accept) = self.accept {
            builder = builder.accept(accept);
        }

        if let Some(ref body) = self.body {
            builder = builder.body(body.clone());
        }

        builder
    }

    fn resolve_method(args: &CurlArgs) -> Result<Method, ConfigError> {
        // Priority: CLI explicit > default
        let method_str = args.method.as_deref().unwrap_or(defaults::METHOD);

        method_str
            .to_ascii_uppercase()
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(
        args: &CurlArgs,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<HeaderItem>, ConfigError> {
        let mut items = Vec::new();

        // TOML headers first so CLI items override them
        if let Some(toml) = toml {
            let mut pairs: Vec<_> = toml.headers.iter().collect();
            pairs.sort();
            items.extend(
                pairs
                    .into_iter()
                    .map(|(name, value)| HeaderItem::set(name.as_str(), value.as_str())),
            );
        }

        for header_str in &args.headers {
            let item = header_str
                .parse::<HeaderItem>()
                .map_err(|reason| ConfigError::InvalidHeader {
                    value: header_str.clone(),
                    reason,
                })?;
            items.push(item);
        }

        // Reject bad names and values now rather than at send time
        let mut scratch = HeaderMap::new();
        for item in &items {
            item.apply(&mut scratch)
                .map_err(|e| ConfigError::InvalidHeader {
                    value: item.name.clone(),
                    reason: e.to_string(),
                })?;
        }

        Ok(items)
    }

    fn resolve_accept(args: &CurlArgs) -> Result<Option<ContentType>, ConfigError> {
        args.accept
            .as_deref()
            .map(str::parse::<ContentType>)
            .transpose()
            .map_err(ConfigError::InvalidContentType)
    }

    fn resolve_timeout(toml: Option<&TomlConfig>) -> Result<Option<Duration>, ConfigError> {
        match toml.and_then(|t| t.transport.timeout_secs) {
            Some(0) => Err(ConfigError::InvalidTimeout(
                "timeout_secs must be greater than 0".to_string(),
            )),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }

    fn build_retry_settings(
        args: &CurlArgs,
        toml: Option<&TomlConfig>,
    ) -> Result<RetrySettings, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = args
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_ms = args
            .retry_delay_ms
            .or_else(|| retry.and_then(|r| r.initial_delay_ms))
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_MS);

        let max_delay_ms = retry
            .and_then(|r| r.max_delay_ms)
            .unwrap_or(defaults::RETRY_MAX_DELAY_MS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        let backoff = if initial_delay_ms == 0 {
            None
        } else {
            if max_delay_ms < initial_delay_ms {
                return Err(ConfigError::InvalidRetry(format!(
                    "max_delay_ms ({max_delay_ms}) must be >= initial_delay_ms ({initial_delay_ms})"
                )));
            }
            Some(
                ExponentialBackoff::new()
                    .with_initial_delay(Duration::from_millis(initial_delay_ms))
                    .with_max_delay(Duration::from_millis(max_delay_ms))
                    .with_multiplier(multiplier),
            )
        };

        Ok(RetrySettings {
            max_attempts,
            backoff,
            transient_only: retry.is_some_and(|r| r.transient_only),
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Picks the config file to read: the explicit path, else the default if it exists.
pub(crate) fn config_file(explicit: Option<&Path>, default: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| default.filter(|path| path.is_file()))
}

fn parse_url(url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
