//! Exponential backoff delay curve for [`RetryTransport`](super::RetryTransport).

use std::time::Duration;

/// Configuration for exponential backoff between retry attempts.
///
/// Controls how long to wait between attempts. Delays grow by a
/// configurable multiplier and are capped at a maximum.
///
/// # Defaults
///
/// - `initial_delay`: 1 second
/// - `max_delay`: 60 seconds
/// - `multiplier`: 2.0
///
/// # Example
///
/// ```
/// use blocks_transport::transport::ExponentialBackoff;
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::new()
///     .with_initial_delay(Duration::from_millis(200))
///     .with_max_delay(Duration::from_secs(5))
///     .with_multiplier(1.5);
///
/// assert_eq!(backoff.delay_for_retry(0), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    /// Delay before the first retry.
    ///
    /// Subsequent delays are computed by multiplying by `multiplier`.
    pub initial_delay: Duration,

    /// Maximum delay between retries.
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub multiplier: f64,
}

impl ExponentialBackoff {
    /// Default initial delay (1 second).
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

    /// Default maximum delay (60 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

    /// Default multiplier (2.0).
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Creates a backoff curve with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// Sets the initial delay between retries.
    ///
    /// Zero delay is supported but turns the curve into an immediate retry.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the delay multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is not positive (must be > 0.0).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "multiplier must be positive");
        self.multiplier = multiplier;
        self
    }

    /// Computes the delay for a given retry number (0-indexed).
    ///
    /// `retry` 0 is the delay before the first retry, 1 before the second,
    /// and so on. The result is capped at `max_delay`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let grown = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);

        // Clamp in Duration space: large f64 seconds do not fit a Duration
        Duration::try_from_secs_f64(grown).map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Computes the delay after `attempts` failed attempts (1-indexed).
    ///
    /// This is the shape [`RetryTransport`](super::RetryTransport) expects
    /// from its delay function.
    #[must_use]
    pub fn delay_after_attempts(&self, attempts: u32) -> Duration {
        self.delay_for_retry(attempts.saturating_sub(1))
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new()
    }
}
