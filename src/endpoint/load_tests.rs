//! Tests for loading endpoints through transports.

use std::sync::Arc;

use http::Method;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::{Endpoint, EndpointBuilder, HeaderItem, TransportExt};
use crate::transport::test_fixtures::{ScriptedTransport, test_request};
use crate::transport::{
    HttpResponse, MockTransport, ReqwestClient, RetryTransport, StatusCheckingTransport,
    TransportError, retry,
};

#[derive(Debug, PartialEq, Eq, Deserialize)]
struct Quote {
    id: u32,
    text: String,
}

fn quote_endpoint() -> Endpoint<Quote> {
    EndpointBuilder::parse(Method::GET, "https://foo.tld/quotes/1")
        .unwrap()
        .build_json()
        .unwrap()
}

mod json_endpoints {
    use super::*;

    #[tokio::test]
    async fn decodes_typed_value() {
        let transport = MockTransport::with_body(br#"{"id":1,"text":"hi"}"#.to_vec());

        let quote = transport
            .load(&quote_endpoint(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            quote,
            Quote {
                id: 1,
                text: "hi".to_string()
            }
        );
    }

    #[tokio::test]
    async fn empty_body_is_no_data() {
        let transport = MockTransport::default();

        let result = transport
            .load(&quote_endpoint(), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(TransportError::NoData)));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let transport = MockTransport::with_body(b"{not json".to_vec());

        let result = transport
            .load(&quote_endpoint(), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[tokio::test]
    async fn custom_decoder_is_used() {
        let transport = MockTransport::with_body(b"42".to_vec());
        let endpoint = EndpointBuilder::parse(Method::GET, "https://foo.tld/n")
            .unwrap()
            .build_json_with(|bytes| {
                std::str::from_utf8(bytes)
                    .map_err(TransportError::parse)?
                    .parse::<u64>()
                    .map_err(TransportError::parse)
            })
            .unwrap();

        let n = transport
            .load(&endpoint, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(n, 42);
    }
}

mod unit {
    use super::*;

    #[tokio::test]
    async fn ignores_response_body() {
        let transport = MockTransport::with_body(b"whatever".to_vec());
        let endpoint = EndpointBuilder::parse(Method::DELETE, "https://foo.tld/items/1")
            .unwrap()
            .build_unit()
            .unwrap();

        let result = transport
            .load(&endpoint, &CancellationToken::new())
            .await;

        assert!(result.is_ok());
    }
}

mod parse_inputs {
    use super::*;

    #[tokio::test]
    async fn empty_body_reaches_parse_as_none() {
        let endpoint = Endpoint::new(test_request(), |body, response| {
            Ok((body.is_none(), response.map(|r| r.status.as_u16())))
        });

        let (was_none, status) = MockTransport::default()
            .load(&endpoint, &CancellationToken::new())
            .await
            .unwrap();

        assert!(was_none);
        assert_eq!(status, Some(200));
    }

    #[tokio::test]
    async fn sends_the_endpoint_request() {
        let transport = Arc::new(ScriptedTransport::success());
        let endpoint = EndpointBuilder::parse(Method::GET, "https://foo.tld/bar")
            .unwrap()
            .header(HeaderItem::set("a-header", "a-value"))
            .build(|body, _| Ok(body.map(<[u8]>::to_vec)))
            .unwrap();

        let body = transport
            .load(&endpoint, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(body.as_deref(), Some(b"ok".as_slice()));
        assert_eq!(transport.captured_requests(), vec![endpoint.request().clone()]);
    }
}

mod through_pipeline {
    use super::*;

    #[tokio::test]
    async fn transport_errors_pass_through_unchanged() {
        let transport = StatusCheckingTransport::new(ScriptedTransport::status(404, b"missing"));

        let error = transport
            .load(&quote_endpoint(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(error.as_wrong_status().unwrap().body, b"missing");
    }

    #[tokio::test]
    async fn load_retries_then_parses() {
        let base = Arc::new(ScriptedTransport::new(
            vec![Err(TransportError::Timeout)],
            || Ok(HttpResponse::ok(br#"{"id":7,"text":"again"}"#.to_vec())),
        ));
        let transport = RetryTransport::new(StatusCheckingTransport::new(base.clone()))
            .with_can_retry(retry::max_attempts(3));

        let quote = transport
            .load(&quote_endpoint(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(quote.id, 7);
        assert_eq!(base.calls(), 2);
    }

    #[tokio::test]
    async fn cancelled_load_reports_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let transport = RetryTransport::new(ReqwestClient::new());

        let result = transport.load(&quote_endpoint(), &cancel).await;

        assert!(matches!(result, Err(TransportError::Cancelled)));
    }
}
