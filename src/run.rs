//! Application execution logic.
//!
//! This module builds the transport pipeline from the validated config,
//! sends the configured request and writes the response to stdout.

use std::io::Write;
use std::time::Duration;

use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use blocks_transport::config::ValidatedConfig;
use blocks_transport::endpoint::TransportExt;
use blocks_transport::transport::{
    HttpResponse, LoggingTransport, ReqwestClient, RetryTransport, StatusCheckingTransport,
    Transport, TransportError,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request failed after passing through the pipeline.
    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),

    /// Failed to write the response.
    #[error("Failed to write response: {0}")]
    Output(#[source] std::io::Error),
}

impl RunError {
    /// Returns true if the request was cancelled by a shutdown signal.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Cancelled))
    }
}

/// The stages every request passes through, outermost first.
type Pipeline<T> = RetryTransport<StatusCheckingTransport<LoggingTransport<T>>>;

/// Sends the configured request and prints the response.
///
/// A Ctrl+C or SIGTERM while the request is in flight cancels it,
/// including any pending retry delay.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - The request fails, is rejected, or is cancelled
/// - The response cannot be written to stdout
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// real network access and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = create_client(config.timeout)?;
    let pipeline = build_pipeline(client, &config);

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(cancel_on_shutdown(cancel.clone()));

    let result = fetch(&pipeline, &config, &cancel).await;
    watcher.abort();
    let response = result?;

    let mut stdout = std::io::stdout().lock();
    write_response(&mut stdout, &response, config.include).map_err(RunError::Output)
}

fn create_client(timeout: Option<Duration>) -> Result<ReqwestClient, RunError> {
    let Some(timeout) = timeout else {
        return Ok(ReqwestClient::new());
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(RunError::ClientBuild)?;

    Ok(ReqwestClient::from_client(client))
}

/// Wraps `base` in logging, status checking and retry, as configured.
fn build_pipeline<T>(base: T, config: &ValidatedConfig) -> Pipeline<T> {
    let logging = LoggingTransport::new(base, config.subsystem.clone())
        .with_category(config.category.clone());

    let mut status = StatusCheckingTransport::new(logging);
    if !config.status_check {
        status = status.with_expected_status(|_| true);
    }

    let retry = RetryTransport::new(status).with_can_retry(config.retry.can_retry());
    match config.retry.backoff {
        Some(backoff) => retry.with_backoff(backoff),
        None => retry,
    }
}

/// Loads the configured request through `transport`, keeping the whole response.
async fn fetch<T: Transport>(
    transport: &T,
    config: &ValidatedConfig,
    cancel: &CancellationToken,
) -> Result<HttpResponse, RunError> {
    let endpoint = config
        .endpoint_builder()
        .build(|_, response| response.cloned().ok_or(TransportError::NoData))?;

    tracing::debug!("Sending {endpoint}");
    Ok(transport.load(&endpoint, cancel).await?)
}

/// Writes the body, preceded by the status line and headers when `include` is set.
fn write_response<W: Write>(
    out: &mut W,
    response: &HttpResponse,
    include: bool,
) -> std::io::Result<()> {
    if include {
        writeln!(out, "HTTP {}", response.status)?;
        for (name, value) in &response.headers {
            writeln!(out, "{name}: {}", String::from_utf8_lossy(value.as_bytes()))?;
        }
        writeln!(out)?;
    }

    out.write_all(&response.body)?;
    out.flush()
}

/// Cancels `cancel` once a shutdown signal arrives.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn cancel_on_shutdown(cancel: CancellationToken) {
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, cancelling request...");
    cancel.cancel();
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Handles both Ctrl+C (SIGINT) and SIGTERM on Unix systems.
/// On Windows, only Ctrl+C is handled.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
