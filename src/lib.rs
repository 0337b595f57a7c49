#![doc(html_root_url = "https://docs.rs/brokerlink/latest")]
//! Asynchronous client connection to a single message-log broker.
//!
//! A [`Broker`] owns one TCP connection, frames and writes requests on it,
//! and pairs each response with the caller that sent the matching request.
//! Many tasks may share one connected handle; requests are pipelined and
//! answered in the order they were written.

pub mod broker;
pub mod byte_order;
pub mod error;
pub mod frame;
pub mod message;
pub mod metrics;
pub mod protocol;
pub mod serializer;

pub use broker::{
    Broker,
    BrokerBuilder,
    BrokerConfig,
    SocketOptions,
    TracingConfig,
    UNKNOWN_BROKER_ID,
};
pub use error::{BoxError, BrokerError, DecodingError, Result};
pub use message::Message;
pub use metrics::{BROKERS_CONNECTED, ERRORS_TOTAL, REQUESTS_SENT, RESPONSES_RECEIVED};
pub use serializer::{BincodeSerializer, Serializer};
