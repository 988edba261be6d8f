//! Shared test fixtures for transport stage tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio_util::sync::CancellationToken;

use super::{HttpRequest, HttpResponse, Transport, TransportError};

type Outcome = Result<HttpResponse, TransportError>;

/// Transport that replays a scripted sequence of outcomes.
///
/// Once the script is exhausted, every call produces the fallback outcome.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    fallback: fn() -> Outcome,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Outcome>, fallback: fn() -> Outcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Always answers `200 OK`.
    pub fn success() -> Self {
        Self::new(Vec::new(), || Ok(ok_response(b"ok")))
    }

    /// Always fails with a timeout.
    pub fn always_failing() -> Self {
        Self::new(Vec::new(), || Err(TransportError::Timeout))
    }

    /// Fails with a timeout `failures` times, then succeeds.
    pub fn failing_then_success(failures: usize) -> Self {
        let script = (0..failures).map(|_| Err(TransportError::Timeout)).collect();
        Self::new(script, || Ok(ok_response(b"recovered")))
    }

    /// Always answers with the given status and body.
    pub fn status(status: u16, body: &'static [u8]) -> Self {
        let response = HttpResponse::new(
            http::StatusCode::from_u16(status).unwrap(),
            http::HeaderMap::new(),
            body.to_vec(),
        );
        Self::new(vec![Ok(response)], || Err(TransportError::Timeout))
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(
        &self,
        req: HttpRequest,
        _cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(self.fallback)
    }
}

pub fn ok_response(body: &[u8]) -> HttpResponse {
    HttpResponse::ok(body.to_vec())
}

pub fn test_url() -> url::Url {
    url::Url::parse("https://foo.tld/bar").unwrap()
}

pub fn test_request() -> HttpRequest {
    HttpRequest::get(test_url())
}

pub fn connection_error(message: &str) -> TransportError {
    TransportError::Connection(Box::new(std::io::Error::other(message.to_string())))
}
