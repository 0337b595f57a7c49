//! Builder for [`Broker`] handles with custom settings.

use std::time::Duration;

use tokio::sync::Mutex;

use super::{Broker, BrokerConfig, SocketOptions, TracingConfig, UNKNOWN_BROKER_ID};
use crate::serializer::{BincodeSerializer, Serializer};

/// Builder for [`Broker`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use brokerlink::Broker;
///
/// let broker = Broker::builder("localhost", 9092)
///     .id(1)
///     .queue_capacity(32)
///     .request_timeout(Some(Duration::from_secs(10)))
///     .nodelay(true)
///     .build();
/// assert_eq!(broker.id(), 1);
/// assert_eq!(broker.config().queue_capacity_value(), 32);
/// ```
#[derive(Debug)]
pub struct BrokerBuilder<S = BincodeSerializer>
where
    S: Serializer,
{
    id: i32,
    host: String,
    port: i32,
    serializer: S,
    config: BrokerConfig,
}

impl BrokerBuilder<BincodeSerializer> {
    /// Start a builder for the broker at `host:port` with default settings.
    #[must_use]
    pub fn new(host: impl Into<String>, port: i32) -> Self {
        Self {
            id: UNKNOWN_BROKER_ID,
            host: host.into(),
            port,
            serializer: BincodeSerializer,
            config: BrokerConfig::default(),
        }
    }
}

impl<S> BrokerBuilder<S>
where
    S: Serializer,
{
    /// Set the broker id learned from metadata.
    #[must_use]
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Replace the body serializer.
    #[must_use]
    pub fn serializer<S2>(self, serializer: S2) -> BrokerBuilder<S2>
    where
        S2: Serializer,
    {
        BrokerBuilder {
            id: self.id,
            host: self.host,
            port: self.port,
            serializer,
            config: self.config,
        }
    }

    /// Replace every connection setting at once.
    #[must_use]
    pub fn config(mut self, config: BrokerConfig) -> Self {
        self.config = config;
        self
    }

    /// See [`BrokerConfig::queue_capacity`].
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.queue_capacity(capacity);
        self
    }

    /// See [`BrokerConfig::max_frame_length`].
    #[must_use]
    pub fn max_frame_length(mut self, max_frame_length: usize) -> Self {
        self.config = self.config.max_frame_length(max_frame_length);
        self
    }

    /// See [`BrokerConfig::connect_timeout`].
    #[must_use]
    pub fn connect_timeout(mut self, limit: Option<Duration>) -> Self {
        self.config = self.config.connect_timeout(limit);
        self
    }

    /// See [`BrokerConfig::request_timeout`].
    #[must_use]
    pub fn request_timeout(mut self, limit: Option<Duration>) -> Self {
        self.config = self.config.request_timeout(limit);
        self
    }

    /// See [`BrokerConfig::drain_timeout`].
    #[must_use]
    pub fn drain_timeout(mut self, limit: Option<Duration>) -> Self {
        self.config = self.config.drain_timeout(limit);
        self
    }

    /// Replace the socket options applied before connecting.
    #[must_use]
    pub fn socket_options(mut self, socket_options: SocketOptions) -> Self {
        self.config = self.config.socket_options(socket_options);
        self
    }

    /// Configure `TCP_NODELAY` for the connection.
    #[must_use]
    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.config.socket_options = self.config.socket_options.nodelay(enabled);
        self
    }

    /// Configure `SO_KEEPALIVE` for the connection.
    #[must_use]
    pub fn keepalive(mut self, duration: Option<Duration>) -> Self {
        self.config.socket_options = self.config.socket_options.keepalive(duration);
        self
    }

    /// Replace the tracing configuration.
    #[must_use]
    pub fn tracing_config(mut self, tracing: TracingConfig) -> Self {
        self.config = self.config.tracing_config(tracing);
        self
    }

    /// Finish building a disconnected handle.
    #[must_use]
    pub fn build(self) -> Broker<S> {
        Broker {
            id: self.id,
            host: self.host,
            port: self.port,
            serializer: self.serializer,
            config: self.config,
            connection: Mutex::new(None),
        }
    }
}
