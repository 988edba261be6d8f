//! Status-checking stage for the transport pipeline.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{HttpRequest, HttpResponse, Transport, TransportError, WrongStatusCode};

/// Predicate over the numeric status code; `true` means expected.
pub type ExpectedStatus = Arc<dyn Fn(u16) -> bool + Send + Sync>;

/// Accepts `200 <= code < 300`.
#[must_use]
pub const fn expected_2xx(code: u16) -> bool {
    code >= 200 && code < 300
}

/// A transport stage that turns unexpected statuses into errors.
///
/// After the wrapped transport succeeds, the status code is checked
/// against a predicate. A rejected status becomes
/// [`TransportError::UnexpectedStatus`], carrying the status, headers and
/// body of the response. Failures of the wrapped transport are passed
/// through untouched.
pub struct StatusCheckingTransport<T> {
    inner: T,
    expected: ExpectedStatus,
}

impl<T> StatusCheckingTransport<T> {
    /// Wraps `inner`, accepting 2xx statuses only.
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            expected: Arc::new(expected_2xx),
        }
    }

    /// Replaces the status predicate.
    #[must_use]
    pub fn with_expected_status(
        mut self,
        expected: impl Fn(u16) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.expected = Arc::new(expected);
        self
    }

    /// Returns the wrapped transport.
    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for StatusCheckingTransport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusCheckingTransport")
            .field("inner", &self.inner)
            .field("expected", &"<fn>")
            .finish()
    }
}

impl<T: Transport> Transport for StatusCheckingTransport<T> {
    async fn send(
        &self,
        req: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let response = self.inner.send(req, cancel).await?;

        if (self.expected)(response.status.as_u16()) {
            return Ok(response);
        }

        Err(WrongStatusCode {
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
        .into())
    }
}
