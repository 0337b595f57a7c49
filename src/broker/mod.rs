//! Connection manager for a single broker.
//!
//! A [`Broker`] is a shareable handle: any number of tasks may issue requests
//! through `&Broker` at once. Writes are serialised by an internal lock, and
//! a background dispatcher task hands each response back to the caller that
//! sent the matching request.

use std::{fmt, net::SocketAddr};

use tokio::{net::lookup_host, sync::Mutex};
use tracing::{Span, field, info};

use crate::{
    error::{BrokerError, Result},
    protocol::BrokerMetadata,
    serializer::{BincodeSerializer, Serializer},
};

mod builder;
mod config;
mod connection;
mod dispatcher;
mod messaging;
mod promise;
mod rpc;
mod socket_options;
mod tracing_config;
mod tracing_helpers;

pub use builder::BrokerBuilder;
pub use config::BrokerConfig;
use connection::Connection;
pub use socket_options::SocketOptions;
pub use tracing_config::TracingConfig;
use tracing_helpers::{close_span, connect_span, instrumented};

/// Broker id used when the id is not known yet.
pub const UNKNOWN_BROKER_ID: i32 = -1;

/// Handle to one broker, identified by id, host and port.
///
/// The identity never changes after construction. The connection state is
/// independent of it: a handle starts disconnected and may be connected and
/// closed repeatedly.
///
/// # Examples
///
/// ```
/// use brokerlink::Broker;
///
/// let a = Broker::new("localhost", 9092);
/// let b = Broker::new("localhost", 9092);
/// assert_eq!(a, b);
/// assert_eq!(a.id(), -1);
/// assert!(!a.is_connected());
/// ```
pub struct Broker<S = BincodeSerializer>
where
    S: Serializer,
{
    id: i32,
    host: String,
    port: i32,
    serializer: S,
    config: BrokerConfig,
    connection: Mutex<Option<Connection>>,
}

impl Broker<BincodeSerializer> {
    /// Create a disconnected handle with an unknown id.
    #[must_use]
    pub fn new(host: impl Into<String>, port: i32) -> Self {
        BrokerBuilder::new(host, port).build()
    }

    /// Start building a handle with custom settings.
    #[must_use]
    pub fn builder(host: impl Into<String>, port: i32) -> BrokerBuilder {
        BrokerBuilder::new(host, port)
    }

    /// Create a disconnected handle for a broker described by metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use brokerlink::{Broker, protocol::BrokerMetadata};
    ///
    /// let meta = BrokerMetadata {
    ///     node_id: 3,
    ///     host: "kafka-3".into(),
    ///     port: 9092,
    /// };
    /// let broker = Broker::from_metadata(&meta);
    /// assert_eq!(broker.id(), 3);
    /// assert_eq!(broker.addr(), "kafka-3:9092");
    /// ```
    #[must_use]
    pub fn from_metadata(metadata: &BrokerMetadata) -> Self {
        BrokerBuilder::new(metadata.host.clone(), metadata.port)
            .id(metadata.node_id)
            .build()
    }
}

impl<S> Broker<S>
where
    S: Serializer,
{
    /// Broker id, or [`UNKNOWN_BROKER_ID`].
    #[must_use]
    pub fn id(&self) -> i32 { self.id }

    #[must_use]
    pub fn host(&self) -> &str { &self.host }

    #[must_use]
    pub fn port(&self) -> i32 { self.port }

    /// `host:port` as configured, without resolution.
    #[must_use]
    pub fn addr(&self) -> String { format!("{}:{}", self.host, self.port) }

    #[must_use]
    pub fn config(&self) -> &BrokerConfig { &self.config }

    /// Returns true while a socket is open.
    ///
    /// Reports `false` while another task holds the connection lock.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection
            .try_lock()
            .is_ok_and(|connection| connection.is_some())
    }

    /// Address of the connected peer, if any.
    pub async fn peer_addr(&self) -> Option<SocketAddr> {
        self.connection.lock().await.as_ref().map(Connection::peer_addr)
    }

    /// Open a socket to the broker and start the response dispatcher.
    ///
    /// The correlation counter restarts at zero on every connect.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::AlreadyConnected`] if a socket is already
    /// open, a resolution error if the host cannot be resolved,
    /// [`BrokerError::Timeout`] if the configured connect timeout elapses,
    /// or [`BrokerError::Io`] if the connection attempt fails.
    pub async fn connect(&self) -> Result<()> {
        let config = &self.config.tracing;
        let span = connect_span(config, &self.host, self.port);
        instrumented(span, config.connect_timing, async {
            let mut connection = self.connection.lock().await;
            if connection.is_some() {
                return Err(BrokerError::AlreadyConnected);
            }
            let addr = self.resolve().await?;
            Span::current().record("peer.addr", field::display(addr));
            *connection = Some(Connection::open(addr, &self.config).await?);
            info!(broker.id = self.id, "connected to broker");
            Ok(())
        })
        .await
    }

    /// Close the socket and stop the dispatcher.
    ///
    /// Waits for a request write already in progress, then up to the
    /// configured drain timeout for outstanding responses. Requests still
    /// pending afterwards resolve with [`BrokerError::ConnectionClosed`], as
    /// do callers waiting for queue space. The handle is disconnected once
    /// this returns, even on error, and may be connected again.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::NotConnected`] if no socket is open, or
    /// [`BrokerError::Io`] if buffered request bytes cannot be flushed while
    /// the socket closes.
    pub async fn close(&self) -> Result<()> {
        let config = &self.config.tracing;
        let span = close_span(config, &self.host, self.port);
        instrumented(span, config.close_timing, async {
            let mut connection = self.connection.lock().await;
            let open = connection.take().ok_or(BrokerError::NotConnected)?;
            let closed = open.shutdown(self.config.drain_timeout).await;
            info!(broker.id = self.id, "closed broker connection");
            closed
        })
        .await
    }

    async fn resolve(&self) -> Result<SocketAddr> {
        let port = u16::try_from(self.port).map_err(|_| BrokerError::InvalidPort(self.port))?;
        let mut addrs = lookup_host((self.host.as_str(), port))
            .await
            .map_err(|source| BrokerError::Resolve {
                host: self.host.clone(),
                source,
            })?;
        addrs
            .next()
            .ok_or_else(|| BrokerError::NoAddress(self.host.clone()))
    }
}

/// Handles are equal when id, host and port are equal.
///
/// Connection state and settings do not take part. Comparing
/// `Option<&Broker>` values treats two absent handles as equal and an absent
/// handle as unequal to any present one.
impl<S, T> PartialEq<Broker<T>> for Broker<S>
where
    S: Serializer,
    T: Serializer,
{
    fn eq(&self, other: &Broker<T>) -> bool {
        self.id == other.id && self.host == other.host && self.port == other.port
    }
}

impl<S> Eq for Broker<S> where S: Serializer {}

impl<S> fmt::Debug for Broker<S>
where
    S: Serializer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broker")
            .field("id", &self.id)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
