//! HTTP request/response descriptors and the transport trait.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::TransportError;

/// An HTTP request to be sent.
///
/// This is a value type that can be constructed once and replayed through
/// any [`Transport`]. It uses standard `http` crate types for method and
/// headers, ensuring compatibility with the broader ecosystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map and body is `None`.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header to the request.
    ///
    /// If the header name already exists, the value is appended
    /// (HTTP headers can have multiple values).
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// Renders `METHOD URL`, followed by the body when it is non-empty UTF-8.
impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        let body = self
            .body
            .as_deref()
            .and_then(|b| std::str::from_utf8(b).ok())
            .filter(|s| !s.is_empty());
        if let Some(body) = body {
            write!(f, " {body}")?;
        }
        Ok(())
    }
}

/// An HTTP response received from a server.
///
/// Contains the status code, headers, and body of the response.
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a `200 OK` response with no headers.
    #[must_use]
    pub fn ok(body: Vec<u8>) -> Self {
        Self::new(http::StatusCode::OK, http::HeaderMap::new(), body)
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// The capability to send a request and asynchronously receive a response.
///
/// # Design
///
/// Every pipeline stage implements this trait and wraps exactly one inner
/// transport, so cross-cutting concerns compose as decorators:
///
/// ```text
/// RetryTransport(StatusCheckingTransport(LoggingTransport(ReqwestClient)))
/// ```
///
/// The cancellation token is threaded through every stage. Implementations
/// that suspend must stop and return [`TransportError::Cancelled`] once it
/// fires.
///
/// # Example
///
/// ```
/// use blocks_transport::transport::{HttpRequest, HttpResponse, Transport, TransportError};
/// use tokio_util::sync::CancellationToken;
///
/// struct Echo;
///
/// impl Transport for Echo {
///     async fn send(
///         &self,
///         req: HttpRequest,
///         _cancel: &CancellationToken,
///     ) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::ok(req.body.unwrap_or_default()))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be delivered,
    /// when a stage rejects the outcome, or when `cancel` fires.
    fn send(
        &self,
        req: HttpRequest,
        cancel: &CancellationToken,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    async fn send(
        &self,
        req: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        (**self).send(req, cancel).await
    }
}

impl<T: Transport> Transport for &T {
    async fn send(
        &self,
        req: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        (**self).send(req, cancel).await
    }
}
