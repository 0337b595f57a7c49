//! Canonical error and result types for the crate.
//!
//! Every failure is surfaced to exactly one caller: either returned directly
//! from a non-blocking call (`connect`, `close`, the write half of a request)
//! or delivered through the pending promise of the request it affected.

use std::{error::Error, io};

/// Boxed error produced by a [`Serializer`](crate::Serializer).
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Errors emitted by [`Broker`](crate::Broker) operations.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    /// `connect` was called on a handle that already holds a socket.
    #[error("broker is already connected")]
    AlreadyConnected,
    /// An operation requiring a socket was called on a disconnected handle.
    #[error("broker is not connected")]
    NotConnected,
    /// The broker host name could not be resolved.
    #[error("failed to resolve broker host {host}")]
    Resolve {
        /// Host name that failed to resolve.
        host: String,
        /// Resolver error.
        #[source]
        source: io::Error,
    },
    /// The broker host name resolved to an empty address list.
    #[error("broker host {0} resolved to no addresses")]
    NoAddress(String),
    /// The port learned from configuration or metadata is not a TCP port.
    #[error("invalid broker port {0}")]
    InvalidPort(i32),
    /// Transport error on an established or connecting socket.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
    /// The client identifier does not fit the request header.
    #[error("client id of {0} bytes exceeds the header limit")]
    ClientIdTooLong(usize),
    /// Failed to serialize an outbound request body.
    #[error("failed to serialize request")]
    Serialize(#[source] BoxError),
    /// Failed to deserialize an inbound response body.
    #[error("failed to deserialize response")]
    Deserialize(#[source] BoxError),
    /// The response violated the framing protocol.
    #[error("decoding error: {0}")]
    Decoding(#[from] DecodingError),
    /// The peer closed the connection, or the read side already failed.
    #[error("connection closed by peer")]
    Disconnected,
    /// The connection was closed locally before a response arrived.
    #[error("connection closed before a response arrived")]
    ConnectionClosed,
    /// The configured deadline elapsed before the operation completed.
    #[error("operation timed out")]
    Timeout,
}

impl BrokerError {
    /// Returns true for protocol-level decoding failures.
    ///
    /// These affect only the request they were delivered to; the connection
    /// stays usable for later requests.
    #[must_use]
    pub fn is_decoding(&self) -> bool { matches!(self, Self::Decoding(_) | Self::Deserialize(_)) }

    /// Short, stable label used for metrics.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyConnected | Self::NotConnected => "lifecycle",
            Self::Resolve { .. } | Self::NoAddress(_) | Self::InvalidPort(_) => "resolve",
            Self::Io(_) | Self::Disconnected | Self::ConnectionClosed => "transport",
            Self::ClientIdTooLong(_) | Self::Serialize(_) => "encoding",
            Self::Deserialize(_) | Self::Decoding(_) => "decoding",
            Self::Timeout => "timeout",
        }
    }
}

/// Protocol violations detected while reading a response frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodingError {
    /// The response header carried a length outside the accepted range.
    #[error("invalid response length {length}; expected 4..={max}")]
    InvalidLength {
        /// Length read from the header.
        length: i32,
        /// Largest accepted length.
        max: usize,
    },
    /// The response echoed a correlation id other than the one expected.
    #[error("correlation id mismatch: expected {expected}, received {received}")]
    CorrelationMismatch {
        /// Correlation id of the oldest pending request.
        expected: i32,
        /// Correlation id found in the response header.
        received: i32,
    },
    /// The response body decoded without consuming every byte.
    #[error("{remaining} trailing bytes after response body")]
    TrailingBytes {
        /// Bytes left unread.
        remaining: usize,
    },
}

/// Canonical result alias used by `brokerlink` public APIs.
pub type Result<T> = std::result::Result<T, BrokerError>;

#[cfg(test)]
mod tests {
    use std::io;

    use rstest::rstest;

    use super::{BrokerError, DecodingError};

    #[rstest]
    #[case(
        BrokerError::Decoding(DecodingError::CorrelationMismatch { expected: 1, received: 2 }),
        true
    )]
    #[case(BrokerError::Deserialize(Box::new(io::Error::other("bad body"))), true)]
    #[case(BrokerError::Disconnected, false)]
    #[case(BrokerError::NotConnected, false)]
    fn decoding_class_is_identified(#[case] error: BrokerError, #[case] expected: bool) {
        assert_eq!(error.is_decoding(), expected);
    }

    #[test]
    fn mismatch_display_names_both_ids() {
        let err = BrokerError::from(DecodingError::CorrelationMismatch {
            expected: 7,
            received: 9,
        });
        assert_eq!(
            err.to_string(),
            "decoding error: correlation id mismatch: expected 7, received 9"
        );
    }
}
