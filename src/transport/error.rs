//! Error types for transport operations.

use std::fmt;

use thiserror::Error;

/// Error type for every stage of the transport pipeline.
///
/// The variants fall into a small, closed taxonomy:
/// - transport-level failures reported by the base transport
///   ([`Connection`](Self::Connection), [`Timeout`](Self::Timeout),
///   [`NotHttpResponse`](Self::NotHttpResponse))
/// - construction failures raised before any network activity
///   ([`InvalidUrl`](Self::InvalidUrl), [`InvalidHeader`](Self::InvalidHeader),
///   [`Encode`](Self::Encode))
/// - unexpected statuses reclassified by [`StatusCheckingTransport`]
/// - aggregate failures from an exhausted [`RetryTransport`]
/// - parse failures raised by an [`Endpoint`]
///   ([`NoData`](Self::NoData), [`Decode`](Self::Decode), [`Parse`](Self::Parse))
/// - cancellation of the surrounding task ([`Cancelled`](Self::Cancelled))
///
/// [`StatusCheckingTransport`]: super::StatusCheckingTransport
/// [`RetryTransport`]: super::RetryTransport
/// [`Endpoint`]: crate::endpoint::Endpoint
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The server answered with something that is not an HTTP response.
    ///
    /// [`ReqwestClient`](super::ReqwestClient) never reports this; it exists
    /// for custom base transports speaking to non-HTTP endpoints.
    #[error("Unexpected non-HTTP response")]
    NotHttpResponse,

    /// The URL could not be assembled or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value is not legal HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The offending header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response status was rejected by a [`StatusCheckingTransport`].
    ///
    /// [`StatusCheckingTransport`]: super::StatusCheckingTransport
    #[error(transparent)]
    UnexpectedStatus(Box<WrongStatusCode>),

    /// Every attempt allowed by a [`RetryTransport`] failed.
    ///
    /// [`RetryTransport`]: super::RetryTransport
    #[error(transparent)]
    RetryExhausted(RetryError),

    /// The response carried no body but the endpoint required one.
    #[error("Response contained no data")]
    NoData,

    /// The response body could not be decoded as JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A custom parse function rejected the response.
    #[error("Failed to parse response: {0}")]
    Parse(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The caller cancelled the operation.
    #[error("Request cancelled")]
    Cancelled,
}

impl TransportError {
    /// Wraps an arbitrary error as a [`Parse`](Self::Parse) failure.
    pub fn parse(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Parse(error.into())
    }

    /// Returns the status error if this is an [`UnexpectedStatus`](Self::UnexpectedStatus).
    #[must_use]
    pub fn as_wrong_status(&self) -> Option<&WrongStatusCode> {
        match self {
            Self::UnexpectedStatus(e) => Some(&**e),
            _ => None,
        }
    }

    /// Returns true for [`Cancelled`](Self::Cancelled).
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if the error is potentially transient.
    ///
    /// Network failures and timeouts are transient. So are server errors
    /// (5xx), rate limiting (429) and request timeouts (408) reported by the
    /// status-checking stage. Construction, parse and cancellation errors
    /// never are.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::UnexpectedStatus(e) => {
                e.status.is_server_error()
                    || e.status == http::StatusCode::TOO_MANY_REQUESTS
                    || e.status == http::StatusCode::REQUEST_TIMEOUT
            }
            Self::NotHttpResponse
            | Self::InvalidUrl(_)
            | Self::InvalidHeader { .. }
            | Self::Encode(_)
            | Self::RetryExhausted(_)
            | Self::NoData
            | Self::Decode(_)
            | Self::Parse(_)
            | Self::Cancelled => false,
        }
    }
}

impl From<WrongStatusCode> for TransportError {
    fn from(error: WrongStatusCode) -> Self {
        Self::UnexpectedStatus(Box::new(error))
    }
}

impl From<RetryError> for TransportError {
    fn from(error: RetryError) -> Self {
        Self::RetryExhausted(error)
    }
}

/// A successful transport call whose status was not expected.
///
/// Keeps the whole response so callers can inspect server-provided
/// error payloads.
#[derive(Debug, Clone, Error)]
#[error("Unexpected HTTP status code: {}", .status.as_u16())]
pub struct WrongStatusCode {
    /// The rejected status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Vec<u8>,
}

impl WrongStatusCode {
    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// One failed attempt recorded by a [`RetryTransport`](super::RetryTransport).
#[derive(Debug)]
pub struct AttemptFailure {
    /// Attempt number (1 = first attempt)
    pub attempt: u32,
    /// The error this attempt produced
    pub error: TransportError,
}

/// Aggregate of every failure seen during one exhausted retry sequence.
///
/// Failures are ordered by attempt number.
#[derive(Debug, Default)]
pub struct RetryError {
    failures: Vec<AttemptFailure>,
}

impl RetryError {
    /// Creates an aggregate from recorded failures.
    #[must_use]
    pub const fn new(failures: Vec<AttemptFailure>) -> Self {
        Self { failures }
    }

    /// Returns the recorded failures, oldest first.
    #[must_use]
    pub fn failures(&self) -> &[AttemptFailure] {
        &self.failures
    }

    /// Returns the number of failed attempts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the error from the final attempt.
    #[must_use]
    pub fn last_error(&self) -> Option<&TransportError> {
        self.failures.last().map(|f| &f.error)
    }

    /// Iterates over the per-attempt errors in order.
    pub fn errors(&self) -> impl Iterator<Item = &TransportError> {
        self.failures.iter().map(|f| &f.error)
    }

    /// Consumes the aggregate, returning the recorded failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<AttemptFailure> {
        self.failures
    }
}

impl fmt::Display for RetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sending the request threw more errors than RetryTransport could retry: {}",
            self.failures.len()
        )
    }
}

impl std::error::Error for RetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.last_error()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
