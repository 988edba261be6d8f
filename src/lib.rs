//! Blocks: a composable HTTP transport pipeline.
//!
//! A library for sending requests through stacked transport stages
//! (logging, status checking, retry) and decoding responses into
//! typed values through endpoints.

pub mod config;
pub mod endpoint;
pub mod time;
pub mod transport;
