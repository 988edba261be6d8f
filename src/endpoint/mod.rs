//! Typed endpoints over the transport pipeline.
//!
//! An [`Endpoint`] describes one request and how to parse its response.
//! Endpoints are built with [`EndpointBuilder`] and loaded through any
//! [`Transport`](crate::transport::Transport) with [`TransportExt::load`]:
//!
//! ```no_run
//! use blocks_transport::endpoint::{EndpointBuilder, HeaderItem, TransportExt};
//! use blocks_transport::transport::{ReqwestClient, RetryTransport, StatusCheckingTransport};
//! use http::Method;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), blocks_transport::transport::TransportError> {
//! let transport = RetryTransport::new(StatusCheckingTransport::new(ReqwestClient::new()));
//! let endpoint = EndpointBuilder::parse(Method::GET, "https://api.example.com/tags")?
//!     .header(HeaderItem::basic_authentication("user", "secret"))
//!     .build_json::<Vec<String>>()?;
//!
//! let tags = transport.load(&endpoint, &CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod definition;
mod header;
pub mod json;
mod load;

#[cfg(test)]
mod json_tests;
#[cfg(test)]
mod load_tests;

pub use builder::EndpointBuilder;
pub use definition::{Endpoint, Parse};
pub use header::{ContentType, HeaderItem};
pub use load::TransportExt;
