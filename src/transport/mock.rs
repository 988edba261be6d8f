//! A fixed-response transport.

use tokio_util::sync::CancellationToken;

use super::{HttpRequest, HttpResponse, Transport, TransportError};

/// A transport that answers every request with the same response.
///
/// Handy as the innermost stage when exercising decorators or endpoints
/// without a network. Defaults to `200 OK` with an empty body.
///
/// # Example
///
/// ```
/// use blocks_transport::transport::{HttpRequest, MockTransport, Transport};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = MockTransport::with_body(b"hello".to_vec());
/// let req = HttpRequest::get("https://foo.tld/bar".parse()?);
/// let response = transport.send(req, &CancellationToken::new()).await?;
/// assert_eq!(response.body, b"hello");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    response: HttpResponse,
}

impl MockTransport {
    /// Creates a transport returning `response` on every call.
    #[must_use]
    pub const fn new(response: HttpResponse) -> Self {
        Self { response }
    }

    /// Creates a transport returning `200 OK` with the given body.
    #[must_use]
    pub fn with_body(body: Vec<u8>) -> Self {
        Self::new(HttpResponse::ok(body))
    }

    /// Creates a transport returning the given status and body.
    #[must_use]
    pub fn with_status(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self::new(HttpResponse::new(status, http::HeaderMap::new(), body))
    }

    /// Returns the response served by this transport.
    #[must_use]
    pub const fn response(&self) -> &HttpResponse {
        &self.response
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::with_body(Vec::new())
    }
}

impl Transport for MockTransport {
    async fn send(
        &self,
        _req: HttpRequest,
        _cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        Ok(self.response.clone())
    }
}
