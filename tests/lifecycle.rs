//! Connect and close behaviour of a broker handle.

mod common;

use std::time::Duration;

use brokerlink::{Broker, BrokerError, SocketOptions};
use brokerlink_testing::FakeBroker;
use common::{CLIENT_ID, connect, metadata_request, metadata_response};

#[tokio::test]
async fn connect_twice_reports_already_connected() {
    let common::Connected { broker, .. } = connect().await;

    let err = broker.connect().await.expect_err("second connect must fail");
    assert!(matches!(err, BrokerError::AlreadyConnected));
    assert!(broker.is_connected());
}

#[tokio::test]
async fn close_without_connect_reports_not_connected() {
    let broker = Broker::new("127.0.0.1", 9092);
    assert!(matches!(broker.close().await, Err(BrokerError::NotConnected)));
}

#[tokio::test]
async fn close_then_close_again_reports_not_connected() {
    let common::Connected { broker, .. } = connect().await;

    broker.close().await.expect("first close");
    assert!(!broker.is_connected());
    assert!(matches!(broker.close().await, Err(BrokerError::NotConnected)));
}

#[tokio::test]
async fn handle_can_reconnect_after_close() {
    let common::Connected {
        broker, peer, fake, ..
    } = connect().await;
    broker.close().await.expect("close");
    drop(peer);

    broker.connect().await.expect("reconnect");
    let mut peer = fake.accept().await.expect("accept second connection");
    let request = metadata_request("orders");
    let call = broker.get_metadata(CLIENT_ID, &request);
    let serve = async {
        let request = peer.read_request().await.expect("read request");
        assert_eq!(request.correlation_id, 0, "counter restarts on connect");
        peer.reply(request.correlation_id, &metadata_response(2))
            .await
            .expect("reply");
    };
    let (response, ()) = tokio::join!(call, serve);
    assert_eq!(response.expect("metadata"), metadata_response(2));
}

#[tokio::test]
async fn peer_addr_tracks_connection_state() {
    let fake = FakeBroker::bind().await.expect("bind");
    let broker = fake.broker().build();
    assert_eq!(broker.peer_addr().await, None);

    broker.connect().await.expect("connect");
    let _peer = fake.accept().await.expect("accept");
    assert_eq!(broker.peer_addr().await, Some(fake.addr()));

    broker.close().await.expect("close");
    assert_eq!(broker.peer_addr().await, None);
}

#[tokio::test]
async fn connect_to_closed_port_fails_with_transport_error() {
    let fake = FakeBroker::bind().await.expect("bind");
    let broker = fake.broker().build();
    drop(fake);

    let err = broker.connect().await.expect_err("nothing listening");
    assert!(matches!(err, BrokerError::Io(_)));
    assert!(!broker.is_connected());
}

#[tokio::test]
async fn unresolvable_host_fails_with_resolve_error() {
    let broker = Broker::new("no-such-host.invalid", 9092);
    let err = broker.connect().await.expect_err("host must not resolve");
    assert!(matches!(
        err,
        BrokerError::Resolve { .. } | BrokerError::NoAddress(_)
    ));
}

#[tokio::test]
async fn close_with_outstanding_requests_fails_them() {
    let common::Connected {
        broker, mut peer, ..
    } = common::connect_with(|builder| builder.drain_timeout(Some(Duration::from_millis(20))))
        .await;

    let request = metadata_request("orders");
    let call = broker.get_metadata(CLIENT_ID, &request);
    let close = async {
        peer.read_request().await.expect("read request");
        broker.close().await.expect("close");
    };
    let (response, ()) = tokio::join!(call, close);

    assert!(matches!(response, Err(BrokerError::ConnectionClosed)));
    assert!(!broker.is_connected());
}

#[tokio::test]
async fn close_lets_responses_arrive_within_drain_timeout() {
    let common::Connected {
        broker, mut peer, ..
    } = common::connect_with(|builder| builder.drain_timeout(Some(Duration::from_secs(5))))
        .await;

    let request = metadata_request("orders");
    let call = broker.get_metadata(CLIENT_ID, &request);
    let close = async {
        let request = peer.read_request().await.expect("read request");
        let reply = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            peer.reply(request.correlation_id, &metadata_response(1))
                .await
                .expect("reply");
        };
        let (closed, ()) = tokio::join!(broker.close(), reply);
        closed.expect("close");
    };
    let (response, ()) = tokio::join!(call, close);

    assert_eq!(response.expect("drained response"), metadata_response(1));
}

#[tokio::test]
async fn connect_timeout_bounds_the_handshake() {
    // 10.255.255.1 is unroutable; the SYN is never answered.
    let broker = Broker::builder("10.255.255.1", 9092)
        .connect_timeout(Some(Duration::from_millis(50)))
        .build();
    let err = broker.connect().await.expect_err("connect must not succeed");
    assert!(matches!(err, BrokerError::Timeout | BrokerError::Io(_)));
}

#[tokio::test]
async fn connect_applies_every_socket_option() {
    let fake = FakeBroker::bind().await.expect("bind");
    let options = SocketOptions::default()
        .nodelay(true)
        .keepalive(Some(Duration::from_secs(30)))
        .linger(Some(Duration::from_secs(1)))
        .send_buffer_size(64 * 1024)
        .recv_buffer_size(64 * 1024);
    let broker = fake.broker().socket_options(options).build();

    broker.connect().await.expect("connect with socket options");
    let mut peer = fake.accept().await.expect("accept");
    let request = metadata_request("orders");
    let call = broker.get_metadata(CLIENT_ID, &request);
    let serve = async {
        let request = peer.read_request().await.expect("read request");
        peer.reply(request.correlation_id, &metadata_response(1))
            .await
            .expect("reply");
    };
    let (response, ()) = tokio::join!(call, serve);
    assert_eq!(response.expect("metadata"), metadata_response(1));
    broker.close().await.expect("close");
}

#[tokio::test]
async fn connect_accepts_disabled_keepalive_and_linger() {
    let fake = FakeBroker::bind().await.expect("bind");
    let options = SocketOptions::default()
        .nodelay(false)
        .keepalive(None)
        .linger(None);
    let broker = fake.broker().socket_options(options).build();

    broker.connect().await.expect("connect with options switched off");
    let _peer = fake.accept().await.expect("accept");
    assert!(broker.is_connected());
    broker.close().await.expect("close");
}
