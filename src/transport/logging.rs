//! Logging stage for the transport pipeline.

use tokio_util::sync::CancellationToken;

use super::{HttpRequest, HttpResponse, Transport, TransportError};

/// Default category attached to every logged event.
pub const DEFAULT_CATEGORY: &str = "Networking";

/// A transport stage that logs outgoing requests and incoming responses.
///
/// Events are emitted at `DEBUG` level through `tracing`, tagged with a
/// `subsystem` and a `category`. Response bodies are logged in full, so
/// this stage is meant for diagnostics rather than production traffic.
///
/// The stage never alters the request, the response or the error.
#[derive(Debug, Clone)]
pub struct LoggingTransport<T> {
    inner: T,
    subsystem: String,
    category: String,
}

impl<T> LoggingTransport<T> {
    /// Wraps `inner`, logging under the given subsystem and the default category.
    #[must_use]
    pub fn new(inner: T, subsystem: impl Into<String>) -> Self {
        Self {
            inner,
            subsystem: subsystem.into(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Sets the category attached to logged events.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Returns the configured subsystem.
    #[must_use]
    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    /// Returns the configured category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the wrapped transport.
    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transport> Transport for LoggingTransport<T> {
    async fn send(
        &self,
        req: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        tracing::debug!(
            subsystem = %self.subsystem,
            category = %self.category,
            "-> {req}"
        );

        let response = self.inner.send(req, cancel).await?;

        match response.body_text() {
            Some(text) => tracing::debug!(
                subsystem = %self.subsystem,
                category = %self.category,
                status = response.status.as_u16(),
                "<- {text}"
            ),
            None => tracing::debug!(
                subsystem = %self.subsystem,
                category = %self.category,
                status = response.status.as_u16(),
                "<- {} bytes",
                response.body.len()
            ),
        }

        Ok(response)
    }
}
