//! Construction of endpoints from method, URL and request parts.

use http::{HeaderMap, Method, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{ContentType, Endpoint, HeaderItem};
use crate::transport::{HttpRequest, HttpResponse, TransportError};

/// Builds [`Endpoint`] values.
///
/// Headers are applied in a fixed order: `Accept`, then `Content-Type`,
/// then each [`HeaderItem`] in insertion order. Every step sets the value
/// for its header name, so a later item overrides an earlier one and an
/// item without a value removes the header.
///
/// Query parameters are appended to any query already present on the URL.
///
/// # Example
///
/// ```
/// use blocks_transport::endpoint::{EndpointBuilder, HeaderItem};
/// use http::Method;
///
/// # fn example() -> Result<(), blocks_transport::transport::TransportError> {
/// let endpoint = EndpointBuilder::parse(Method::GET, "https://foo.tld/bar")?
///     .header(HeaderItem::set("a-header", "a-value"))
///     .query("page", "2")
///     .build_json::<Vec<String>>()?;
///
/// assert_eq!(endpoint.to_string(), "GET https://foo.tld/bar?page=2");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    method: Method,
    url: Url,
    accept: Option<ContentType>,
    content_type: Option<ContentType>,
    headers: Vec<HeaderItem>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl EndpointBuilder {
    /// Starts an endpoint for `method` on `url`.
    #[must_use]
    pub const fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            accept: None,
            content_type: None,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Starts an endpoint from a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if `url` does not parse.
    pub fn parse(method: Method, url: &str) -> Result<Self, TransportError> {
        let url =
            Url::parse(url).map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self::new(method, url))
    }

    /// Sets the `Accept` header.
    #[must_use]
    pub const fn accept(mut self, accept: ContentType) -> Self {
        self.accept = Some(accept);
        self
    }

    /// Sets the `Content-Type` header.
    #[must_use]
    pub const fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Adds a header item.
    #[must_use]
    pub fn header(mut self, item: HeaderItem) -> Self {
        self.headers.push(item);
        self
    }

    /// Adds several header items, in order.
    #[must_use]
    pub fn headers(mut self, items: impl IntoIterator<Item = HeaderItem>) -> Self {
        self.headers.extend(items);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Encodes `value` as the JSON request body and sets `Content-Type`
    /// to `application/json`.
    ///
    /// Dates inside `value` follow whatever `serde` attributes its type
    /// declares, e.g. [`javascript_iso8601`](super::json::javascript_iso8601).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if serialization fails.
    pub fn json_body<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, TransportError> {
        let body = serde_json::to_vec(value).map_err(TransportError::Encode)?;
        Ok(self.content_type(ContentType::Json).body(body))
    }

    /// Assembles the request without consuming the builder.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidHeader`] if a header item is not legal HTTP.
    pub fn request(&self) -> Result<HttpRequest, TransportError> {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        let mut headers = HeaderMap::new();
        if let Some(accept) = self.accept {
            headers.insert(header::ACCEPT, accept.header_value());
        }
        if let Some(content_type) = self.content_type {
            headers.insert(header::CONTENT_TYPE, content_type.header_value());
        }
        for item in &self.headers {
            item.apply(&mut headers)?;
        }

        Ok(HttpRequest {
            method: self.method.clone(),
            url,
            headers,
            body: self.body.clone(),
        })
    }

    /// Finishes with a custom parse function.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidHeader`] if a header item is not legal HTTP.
    pub fn build<A, F>(self, parse: F) -> Result<Endpoint<A>, TransportError>
    where
        F: Fn(Option<&[u8]>, Option<&HttpResponse>) -> Result<A, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Ok(Endpoint::new(self.request()?, parse))
    }

    /// Finishes a fire-and-forget endpoint whose response is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidHeader`] if a header item is not legal HTTP.
    pub fn build_unit(self) -> Result<Endpoint<()>, TransportError> {
        self.build(|_, _| Ok(()))
    }

    /// Finishes an endpoint decoding the response body as JSON.
    ///
    /// `Accept` defaults to `application/json` unless set explicitly. A
    /// missing body fails with [`TransportError::NoData`]; undecodable bytes
    /// fail with [`TransportError::Decode`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidHeader`] if a header item is not legal HTTP.
    pub fn build_json<A: DeserializeOwned + 'static>(self) -> Result<Endpoint<A>, TransportError> {
        self.build_json_with(|bytes| {
            serde_json::from_slice(bytes).map_err(TransportError::Decode)
        })
    }

    /// Finishes an endpoint decoding the response body with `decode`.
    ///
    /// Behaves like [`build_json`](Self::build_json) with a custom decoder.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidHeader`] if a header item is not legal HTTP.
    pub fn build_json_with<A, D>(mut self, decode: D) -> Result<Endpoint<A>, TransportError>
    where
        A: 'static,
        D: Fn(&[u8]) -> Result<A, TransportError> + Send + Sync + 'static,
    {
        self.accept.get_or_insert(ContentType::Json);
        self.build(move |body, _| body.map_or(Err(TransportError::NoData), &decode))
    }
}
