//! The `Endpoint` type: one request plus its response parser.

use std::fmt;
use std::sync::Arc;

use crate::transport::{HttpRequest, HttpResponse, TransportError};

/// Converts a response body (if any) and metadata into a typed value.
pub type Parse<A> = Arc<
    dyn Fn(Option<&[u8]>, Option<&HttpResponse>) -> Result<A, TransportError> + Send + Sync,
>;

/// Describes an endpoint returning `A` values.
///
/// An endpoint pairs an [`HttpRequest`] with a function parsing the
/// response. It is a value: building it performs no I/O, and it can be
/// loaded any number of times through any transport with
/// [`TransportExt::load`](super::TransportExt::load).
///
/// Most endpoints are built with [`EndpointBuilder`](super::EndpointBuilder).
pub struct Endpoint<A> {
    request: HttpRequest,
    parse: Parse<A>,
}

impl<A> Endpoint<A> {
    /// Creates an endpoint from a ready-made request and a parse function.
    pub fn new<F>(request: HttpRequest, parse: F) -> Self
    where
        F: Fn(Option<&[u8]>, Option<&HttpResponse>) -> Result<A, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            request,
            parse: Arc::new(parse),
        }
    }

    /// Returns the request sent for this endpoint.
    #[must_use]
    pub const fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Consumes the endpoint, returning its request.
    #[must_use]
    pub fn into_request(self) -> HttpRequest {
        self.request
    }

    /// Runs the parse function on a response.
    ///
    /// # Errors
    ///
    /// Returns whatever the parse function rejects the response with.
    pub fn parse(
        &self,
        body: Option<&[u8]>,
        response: Option<&HttpResponse>,
    ) -> Result<A, TransportError> {
        (self.parse)(body, response)
    }
}

impl<A: 'static> Endpoint<A> {
    /// Transforms the parsed value.
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Endpoint<B>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let parse = self.parse;
        Endpoint::new(self.request, move |body, response| {
            parse(body, response).map(&f)
        })
    }

    /// Transforms the parsed value with a function that may fail.
    #[must_use]
    pub fn and_then<B, F>(self, f: F) -> Endpoint<B>
    where
        F: Fn(A) -> Result<B, TransportError> + Send + Sync + 'static,
    {
        let parse = self.parse;
        Endpoint::new(self.request, move |body, response| {
            parse(body, response).and_then(&f)
        })
    }
}

impl<A> Clone for Endpoint<A> {
    fn clone(&self) -> Self {
        Self {
            request: self.request.clone(),
            parse: Arc::clone(&self.parse),
        }
    }
}

impl<A> fmt::Debug for Endpoint<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("request", &self.request)
            .field("parse", &"<fn>")
            .finish()
    }
}

/// Renders `METHOD URL`, followed by the body when it is non-empty UTF-8.
impl<A> fmt::Display for Endpoint<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.request, f)
    }
}
