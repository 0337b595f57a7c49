//! Tracing spans and timing events for broker operations.
//!
//! Span names appear as context prefixes on event lines, so each test enables
//! timing for the operation under test to produce an event inside its span.

use rstest::rstest;
use tokio::{io::AsyncReadExt, net::TcpListener};
use tracing_test::traced_test;

use crate::{Broker, BrokerError, TracingConfig, protocol::MetadataRequest};

async fn listen() -> (TcpListener, i32) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = i32::from(listener.local_addr().expect("addr").port());
    (listener, port)
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn connect_emits_span_with_broker_address() {
    let (listener, port) = listen().await;
    let broker = Broker::builder("127.0.0.1", port)
        .tracing_config(TracingConfig::default().with_connect_timing(true))
        .build();

    broker.connect().await.expect("connect");
    let _peer = listener.accept().await.expect("accept");

    assert!(logs_contain("broker.connect"));
    assert!(logs_contain("broker.host=\"127.0.0.1\""));
    assert!(logs_contain("elapsed_us"));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn send_span_records_api_key_and_correlation_id() {
    let (listener, port) = listen().await;
    let broker = Broker::builder("127.0.0.1", port)
        .tracing_config(TracingConfig::default().with_send_timing(true))
        .build();
    broker.connect().await.expect("connect");
    let (mut peer, _) = listener.accept().await.expect("accept");

    broker
        .send("unit", &MetadataRequest::default(), false)
        .await
        .expect("send");
    let _ = peer.read_u32().await.expect("length prefix");

    assert!(logs_contain("broker.send"));
    assert!(logs_contain("api_key=3"));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn failed_call_records_error_result() {
    let broker = Broker::builder("127.0.0.1", 9092)
        .tracing_config(TracingConfig::default().with_call_timing(true))
        .build();

    let err = broker
        .get_metadata("unit", &MetadataRequest::default())
        .await
        .expect_err("not connected");
    assert!(matches!(err, BrokerError::NotConnected));
    assert!(logs_contain("broker.call"));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn timing_events_are_off_by_default() {
    let (listener, port) = listen().await;
    let broker = Broker::new("127.0.0.1", port);

    broker.connect().await.expect("connect");
    let _peer = listener.accept().await.expect("accept");
    broker.close().await.expect("close");

    assert!(!logs_contain("elapsed_us"));
}
