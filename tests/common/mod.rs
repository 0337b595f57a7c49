//! Shared utilities for integration tests.
//!
//! Provides a helper that connects a [`Broker`] to a [`FakeBroker`] and
//! returns both ends, plus small request and response fixtures.

// Items in this shared module may not be used by all test binaries that import it.
#![allow(
    dead_code,
    reason = "shared test utilities are not used by all test binaries"
)]

use brokerlink::{
    Broker,
    BrokerBuilder,
    protocol::{
        BrokerMetadata,
        MetadataRequest,
        MetadataResponse,
        PartitionMetadata,
        TopicMetadata,
    },
};
use brokerlink_testing::{FakeBroker, PeerConnection};

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub const CLIENT_ID: &str = "brokerlink-test";

/// A connected handle and the peer end of its socket.
pub struct Connected {
    pub broker: Broker,
    pub peer: PeerConnection,
    pub fake: FakeBroker,
}

/// Connect a handle configured by `configure` to a fresh fake broker.
pub async fn connect_with(configure: impl FnOnce(BrokerBuilder) -> BrokerBuilder) -> Connected {
    let fake = FakeBroker::bind().await.expect("bind fake broker");
    let broker = configure(fake.broker()).build();
    broker.connect().await.expect("connect");
    let peer = fake.accept().await.expect("accept client");
    Connected { broker, peer, fake }
}

/// Connect a handle with default settings to a fresh fake broker.
pub async fn connect() -> Connected { connect_with(|builder| builder).await }

pub fn metadata_request(topic: &str) -> MetadataRequest {
    MetadataRequest {
        topics: vec![topic.to_owned()],
    }
}

/// Metadata naming a single broker; `marker` becomes its node id.
pub fn metadata_response(marker: i32) -> MetadataResponse {
    MetadataResponse {
        brokers: vec![BrokerMetadata {
            node_id: marker,
            host: "kafka-1".into(),
            port: 9092,
        }],
        topics: vec![TopicMetadata {
            error_code: 0,
            name: "orders".into(),
            partitions: vec![PartitionMetadata {
                error_code: 0,
                partition: 0,
                leader: marker,
                replicas: vec![marker],
                isr: vec![marker],
            }],
        }],
    }
}
