//! Connection settings for a [`Broker`](super::Broker).

use std::time::Duration;

use super::{SocketOptions, TracingConfig};
use crate::frame::FrameConfig;

const DEFAULT_QUEUE_CAPACITY: usize = 4;
const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Settings applied each time a [`Broker`](super::Broker) connects.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use brokerlink::BrokerConfig;
///
/// let config = BrokerConfig::default()
///     .queue_capacity(16)
///     .request_timeout(Some(Duration::from_secs(30)));
/// assert_eq!(config.queue_capacity_value(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct BrokerConfig {
    pub(crate) frames: FrameConfig,
    pub(crate) queue_capacity: usize,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) request_timeout: Option<Duration>,
    pub(crate) drain_timeout: Option<Duration>,
    pub(crate) socket_options: SocketOptions,
    pub(crate) tracing: TracingConfig,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            frames: FrameConfig::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            connect_timeout: None,
            request_timeout: None,
            drain_timeout: Some(DEFAULT_DRAIN_TIMEOUT),
            socket_options: SocketOptions::default(),
            tracing: TracingConfig::default(),
        }
    }
}

impl BrokerConfig {
    /// Bound the number of responses awaited at once.
    ///
    /// Senders wait for space once the queue is full. The value is raised to
    /// at least one.
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Return the configured pending-response capacity.
    #[must_use]
    pub const fn queue_capacity_value(&self) -> usize { self.queue_capacity }

    /// Set the maximum frame length accepted in either direction.
    #[must_use]
    pub fn max_frame_length(mut self, max_frame_length: usize) -> Self {
        self.frames = self.frames.max_frame_length(max_frame_length);
        self
    }

    /// Replace the frame settings.
    #[must_use]
    pub fn frames(mut self, frames: FrameConfig) -> Self {
        self.frames = frames;
        self
    }

    /// Return the frame settings.
    #[must_use]
    pub const fn frames_value(&self) -> FrameConfig { self.frames }

    /// Bound how long `connect` waits for the TCP handshake.
    #[must_use]
    pub fn connect_timeout(mut self, limit: Option<Duration>) -> Self {
        self.connect_timeout = limit;
        self
    }

    /// Bound how long a caller waits for each response.
    ///
    /// A request that times out keeps its place in the queue; its response
    /// is read and discarded when it arrives.
    #[must_use]
    pub fn request_timeout(mut self, limit: Option<Duration>) -> Self {
        self.request_timeout = limit;
        self
    }

    /// Bound how long `close` lets outstanding responses arrive.
    ///
    /// `None` fails outstanding responses immediately.
    #[must_use]
    pub fn drain_timeout(mut self, limit: Option<Duration>) -> Self {
        self.drain_timeout = limit;
        self
    }

    /// Replace the socket options applied before connecting.
    #[must_use]
    pub fn socket_options(mut self, socket_options: SocketOptions) -> Self {
        self.socket_options = socket_options;
        self
    }

    /// Replace the tracing configuration.
    #[must_use]
    pub fn tracing_config(mut self, tracing: TracingConfig) -> Self {
        self.tracing = tracing;
        self
    }
}
