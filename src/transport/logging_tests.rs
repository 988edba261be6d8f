//! Tests for `LoggingTransport`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;

use super::logging::DEFAULT_CATEGORY;
use super::test_fixtures::{ScriptedTransport, test_request};
use super::{HttpResponse, LoggingTransport, MockTransport, Transport, TransportError};

/// One captured event: its level and every recorded field.
#[derive(Debug, Clone)]
struct Captured {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl Captured {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            fields: visitor.0,
        });
    }
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// Runs `sut.send` with a capturing subscriber installed for this thread.
async fn send_captured<T: Transport>(
    sut: &T,
) -> (Result<HttpResponse, TransportError>, Vec<Captured>) {
    let capture = EventCapture::default();
    let events = capture.events.clone();
    let subscriber = tracing_subscriber::registry().with(capture);
    let _guard = tracing::subscriber::set_default(subscriber);

    let result = sut
        .send(
            test_request().with_body(b"ping".to_vec()),
            &CancellationToken::new(),
        )
        .await;

    let captured = events.lock().unwrap().clone();
    (result, captured)
}

mod construction {
    use super::*;

    #[test]
    fn new_uses_default_category() {
        let sut = LoggingTransport::new(MockTransport::default(), "com.example.app");

        assert_eq!(sut.subsystem(), "com.example.app");
        assert_eq!(sut.category(), DEFAULT_CATEGORY);
        assert_eq!(DEFAULT_CATEGORY, "Networking");
    }

    #[test]
    fn with_category_overrides_default() {
        let sut = LoggingTransport::new(MockTransport::default(), "sub").with_category("Sync");

        assert_eq!(sut.category(), "Sync");
    }
}

mod events {
    use super::*;

    #[tokio::test]
    async fn logs_request_then_response() {
        let sut = LoggingTransport::new(MockTransport::with_body(b"pong".to_vec()), "com.example");

        let (result, events) = send_captured(&sut).await;

        assert!(result.is_ok());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message(), "-> GET https://foo.tld/bar ping");
        assert_eq!(events[1].message(), "<- pong");
        assert!(events.iter().all(|e| e.level == tracing::Level::DEBUG));
    }

    #[tokio::test]
    async fn events_carry_subsystem_and_category() {
        let sut = LoggingTransport::new(MockTransport::default(), "com.example").with_category("Feed");

        let (_, events) = send_captured(&sut).await;

        for event in &events {
            assert_eq!(event.field("subsystem"), Some("com.example"));
            assert_eq!(event.field("category"), Some("Feed"));
        }
    }

    #[tokio::test]
    async fn response_event_records_status() {
        let sut = LoggingTransport::new(
            MockTransport::with_status(http::StatusCode::NOT_FOUND, b"gone".to_vec()),
            "sub",
        );

        let (result, events) = send_captured(&sut).await;

        // Logging does not judge statuses.
        assert_eq!(result.unwrap().status, http::StatusCode::NOT_FOUND);
        assert_eq!(events[1].field("status"), Some("404"));
    }

    #[tokio::test]
    async fn binary_body_is_summarised_by_length() {
        let sut = LoggingTransport::new(MockTransport::with_body(vec![0xff, 0xfe, 0xfd]), "sub");

        let (_, events) = send_captured(&sut).await;

        assert_eq!(events[1].message(), "<- 3 bytes");
    }

    #[tokio::test]
    async fn failure_logs_request_only_and_propagates_error() {
        let sut = LoggingTransport::new(ScriptedTransport::always_failing(), "sub");

        let (result, events) = send_captured(&sut).await;

        assert!(matches!(result, Err(TransportError::Timeout)));
        assert_eq!(events.len(), 1);
        assert!(events[0].message().starts_with("-> GET"));
    }
}

mod transparency {
    use super::*;

    #[tokio::test]
    async fn request_reaches_inner_unchanged() {
        let inner = Arc::new(ScriptedTransport::success());
        let sut = LoggingTransport::new(inner.clone(), "sub");
        let request = test_request().with_body(b"payload".to_vec());

        sut.send(request.clone(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(inner.captured_requests(), vec![request]);
    }

    #[tokio::test]
    async fn response_is_returned_unchanged() {
        let mock = MockTransport::with_status(http::StatusCode::CREATED, b"made".to_vec());
        let expected = mock.response().clone();
        let sut = LoggingTransport::new(mock, "sub");

        let response = sut
            .send(test_request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(response.status, expected.status);
        assert_eq!(response.body, expected.body);
    }
}
