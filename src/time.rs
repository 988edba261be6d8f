//! Time abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait so retry delays can be
//! skipped in tests while using the tokio timer in production.

use std::time::Duration;

/// Abstraction over asynchronous sleeping.
///
/// Implementations suspend the current task for (at most) the given
/// duration. Callers that need cancellation race the returned future
/// against their own cancellation signal.
///
/// # Example
///
/// ```
/// use blocks_transport::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// InstantSleeper.sleep(Duration::from_secs(60)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Useful in tests to exercise retry loops without real delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
