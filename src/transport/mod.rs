//! Composable HTTP transport pipeline.
//!
//! This module provides types and traits for:
//! - Describing HTTP requests ([`HttpRequest`]) and responses ([`HttpResponse`])
//! - Abstracting over anything that can send them ([`Transport`])
//! - The production base transport ([`ReqwestClient`]) and a fixed-response one ([`MockTransport`])
//! - Decorator stages: [`LoggingTransport`], [`StatusCheckingTransport`], [`RetryTransport`]
//! - Retry policies ([`retry`]) and backoff curves ([`ExponentialBackoff`])
//!
//! A typical stack sends through retry, then status checking, then logging,
//! then the network:
//!
//! ```
//! use blocks_transport::transport::{
//!     LoggingTransport, ReqwestClient, RetryTransport, StatusCheckingTransport,
//! };
//!
//! let transport = RetryTransport::new(StatusCheckingTransport::new(LoggingTransport::new(
//!     ReqwestClient::new(),
//!     "com.example.app",
//! )));
//! ```

mod backoff;
mod client;
mod error;
mod logging;
mod message;
mod mock;
pub mod retry;
pub mod status;

#[cfg(test)]
mod logging_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use backoff::ExponentialBackoff;
pub use client::ReqwestClient;
pub use error::{AttemptFailure, RetryError, TransportError, WrongStatusCode};
pub use message::{HttpRequest, HttpResponse, Transport};
pub use logging::{DEFAULT_CATEGORY, LoggingTransport};
pub use mock::MockTransport;
pub use retry::RetryTransport;
pub use status::StatusCheckingTransport;
