//! Loading endpoints through a transport.

use tokio_util::sync::CancellationToken;

use super::Endpoint;
use crate::transport::{Transport, TransportError};

/// Extension trait adding endpoint loading to every [`Transport`].
///
/// # Example
///
/// ```
/// use blocks_transport::endpoint::{EndpointBuilder, TransportExt};
/// use blocks_transport::transport::MockTransport;
/// use http::Method;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), blocks_transport::transport::TransportError> {
/// let transport = MockTransport::with_body(br#"["a","b"]"#.to_vec());
/// let endpoint = EndpointBuilder::parse(Method::GET, "https://foo.tld/bar")?
///     .build_json::<Vec<String>>()?;
///
/// let items = transport.load(&endpoint, &CancellationToken::new()).await?;
/// assert_eq!(items, vec!["a", "b"]);
/// # Ok(())
/// # }
/// ```
pub trait TransportExt: Transport {
    /// Sends the endpoint's request, then parses the response.
    ///
    /// An empty response body reaches the parse function as `None`.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged, or the parse failure.
    fn load<A>(
        &self,
        endpoint: &Endpoint<A>,
        cancel: &CancellationToken,
    ) -> impl std::future::Future<Output = Result<A, TransportError>> + Send;
}

impl<T: Transport> TransportExt for T {
    async fn load<A>(
        &self,
        endpoint: &Endpoint<A>,
        cancel: &CancellationToken,
    ) -> Result<A, TransportError> {
        let response = self.send(endpoint.request().clone(), cancel).await?;

        let body = (!response.body.is_empty()).then_some(response.body.as_slice());
        endpoint.parse(body, Some(&response))
    }
}
