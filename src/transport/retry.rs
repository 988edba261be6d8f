//! Retry stage for the transport pipeline.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::time::{Sleeper, TokioSleeper};

use super::{
    AttemptFailure, ExponentialBackoff, HttpRequest, HttpResponse, RetryError, Transport,
    TransportError,
};

/// Decides whether another attempt is made, given the most recent error
/// and the number of attempts made so far.
pub type CanRetry = Arc<dyn Fn(&TransportError, u32) -> bool + Send + Sync>;

/// Maps the number of attempts made so far to the delay before the next one.
pub type Delay = Arc<dyn Fn(u32) -> Duration + Send + Sync>;

/// Default number of total attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retries while fewer than `max` attempts have been made, whatever the error.
///
/// With `max <= 1` nothing is ever retried, so a failure comes back as the
/// inner error itself and never as [`TransportError::RetryExhausted`].
#[must_use]
pub fn max_attempts(max: u32) -> CanRetry {
    Arc::new(move |_: &TransportError, attempts: u32| attempts < max)
}

/// Retries transient errors only, while fewer than `max` attempts have been made.
///
/// See [`TransportError::is_transient`] for the classification.
#[must_use]
pub fn transient_only(max: u32) -> CanRetry {
    Arc::new(move |error: &TransportError, attempts: u32| {
        attempts < max && error.is_transient()
    })
}

/// Retries immediately.
#[must_use]
pub fn no_delay() -> Delay {
    Arc::new(|_: u32| Duration::ZERO)
}

/// Waits the same duration before every retry.
#[must_use]
pub fn constant_delay(delay: Duration) -> Delay {
    Arc::new(move |_: u32| delay)
}

/// A transport stage that re-sends failed requests.
///
/// Wraps another [`Transport`]. When the inner call fails, the `can_retry`
/// predicate decides whether to try again, and the `delay` function decides
/// how long to wait first. Attempts are strictly sequential. Every failure
/// of one call is kept, and if the stage gives up after at least one retry
/// they are surfaced together as [`TransportError::RetryExhausted`]. When the
/// predicate refuses to retry the very first failure, that error is returned
/// unchanged.
///
/// Cancellation is never retried. If the inner stage reports
/// [`TransportError::Cancelled`], or the token fires while waiting between
/// attempts, the call ends with [`TransportError::Cancelled`].
///
/// # Defaults
///
/// - `can_retry`: [`max_attempts`]`(3)`, i.e. at most three sends
/// - `delay`: [`no_delay`]
/// - sleeper: [`TokioSleeper`]
///
/// # Example
///
/// ```
/// use blocks_transport::transport::{retry, MockTransport, RetryTransport};
/// use std::time::Duration;
///
/// let transport = RetryTransport::new(MockTransport::default())
///     .with_can_retry(retry::transient_only(5))
///     .with_delay(retry::constant_delay(Duration::from_millis(100)));
/// ```
pub struct RetryTransport<T, S = TokioSleeper> {
    inner: T,
    sleeper: S,
    can_retry: CanRetry,
    delay: Delay,
}

impl<T> RetryTransport<T, TokioSleeper> {
    /// Wraps `inner` with the default retry policy.
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            sleeper: TokioSleeper,
            can_retry: max_attempts(DEFAULT_MAX_ATTEMPTS),
            delay: no_delay(),
        }
    }
}

impl<T, S> RetryTransport<T, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryTransport<T, S2> {
        RetryTransport {
            inner: self.inner,
            sleeper,
            can_retry: self.can_retry,
            delay: self.delay,
        }
    }

    /// Sets the predicate deciding whether to retry.
    #[must_use]
    pub fn with_can_retry(mut self, can_retry: CanRetry) -> Self {
        self.can_retry = can_retry;
        self
    }

    /// Sets the function computing the delay before each retry.
    #[must_use]
    pub fn with_delay(mut self, delay: Delay) -> Self {
        self.delay = delay;
        self
    }

    /// Waits according to an exponential backoff curve between attempts.
    #[must_use]
    pub fn with_backoff(self, backoff: ExponentialBackoff) -> Self {
        self.with_delay(Arc::new(move |attempts: u32| {
            backoff.delay_after_attempts(attempts)
        }))
    }

    /// Returns the wrapped transport.
    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug, S: fmt::Debug> fmt::Debug for RetryTransport<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryTransport")
            .field("inner", &self.inner)
            .field("sleeper", &self.sleeper)
            .field("can_retry", &"<fn>")
            .field("delay", &"<fn>")
            .finish()
    }
}

impl<T: Transport, S: Sleeper> RetryTransport<T, S> {
    /// Waits before the next attempt, unless cancelled first.
    async fn pause(&self, attempts: u32, cancel: &CancellationToken) -> Result<(), TransportError> {
        let delay = (self.delay)(attempts);

        if delay.is_zero() {
            return if cancel.is_cancelled() {
                Err(TransportError::Cancelled)
            } else {
                Ok(())
            };
        }

        tracing::debug!("Waiting {delay:?} before retry");
        tokio::select! {
            biased;

            () = cancel.cancelled() => Err(TransportError::Cancelled),
            () = self.sleeper.sleep(delay) => Ok(()),
        }
    }
}

impl<T: Transport, S: Sleeper> Transport for RetryTransport<T, S> {
    async fn send(
        &self,
        req: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let mut attempts: u32 = 0;
        let mut failures: Vec<AttemptFailure> = Vec::new();

        loop {
            let error = match self.inner.send(req.clone(), cancel).await {
                Ok(response) => return Ok(response),
                Err(TransportError::Cancelled) => {
                    tracing::debug!("Request cancelled after {attempts} failed attempt(s)");
                    return Err(TransportError::Cancelled);
                }
                Err(e) => e,
            };

            attempts += 1;
            tracing::warn!(attempt = attempts, "Request to {} failed: {error}", req.url);

            let retry = (self.can_retry)(&error, attempts);
            failures.push(AttemptFailure {
                attempt: attempts,
                error,
            });

            if !retry {
                break;
            }

            if let Err(e) = self.pause(attempts, cancel).await {
                tracing::debug!("Retry loop cancelled after {attempts} attempt(s)");
                return Err(e);
            }
        }

        // A refusal on the first attempt spent no retry budget.
        if failures.len() == 1 {
            if let Some(only) = failures.pop() {
                return Err(only.error);
            }
        }

        tracing::error!("Giving up on {} after {attempts} attempt(s)", req.url);
        Err(RetryError::new(failures).into())
    }
}
