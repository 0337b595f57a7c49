//! Utilities for exercising a [`Broker`](brokerlink::Broker) against a
//! scripted peer during tests.
//!
//! [`FakeBroker`] listens on an ephemeral local port. Tests accept the
//! client's connection, read the requests it writes and answer with
//! hand-built response frames, including malformed ones.
//!
//! ```rust
//! use brokerlink::protocol::{MetadataRequest, MetadataResponse};
//! use brokerlink_testing::FakeBroker;
//!
//! # async fn example() -> std::io::Result<()> {
//! let fake = FakeBroker::bind().await?;
//! let broker = fake.broker().build();
//! broker.connect().await.expect("connect");
//! let mut peer = fake.accept().await?;
//!
//! let call = tokio::spawn(async move {
//!     broker.get_metadata("doc", &MetadataRequest::default()).await
//! });
//! let request = peer.read_request().await?;
//! peer.reply(request.correlation_id, &MetadataResponse::default()).await?;
//! assert!(call.await.expect("join").is_ok());
//! # Ok(())
//! # }
//! ```

pub mod logging;
pub mod peer;

pub use logging::{LoggerHandle, logger};
pub use peer::{FakeBroker, PeerConnection, RecordedRequest, response_frame};
