//! An open socket to a broker and the dispatcher task reading from it.

use std::{net::SocketAddr, time::Duration};

use bytes::Bytes;
use futures::SinkExt;
use log::warn;
use tokio::{
    net::{TcpSocket, tcp::OwnedWriteHalf},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::Span;
use tokio_util::{
    codec::{FramedRead, FramedWrite, LengthDelimitedCodec},
    sync::{CancellationToken, DropGuard},
};

use super::{
    BrokerConfig,
    dispatcher::receive_responses,
    promise::{PendingResponse, ResponsePromise},
};
use crate::{
    error::{BrokerError, Result},
    frame::{RequestHeader, encode_request},
    metrics,
    protocol::ApiKey,
};

/// State that exists only while a [`Broker`](super::Broker) is connected.
///
/// Dropping a connection without [`shutdown`](Self::shutdown) cancels the
/// dispatcher through the drop guard and lowers the connected gauge.
#[derive(Debug)]
pub(crate) struct Connection {
    writer: FramedWrite<OwnedWriteHalf, LengthDelimitedCodec>,
    correlation_id: i32,
    responses: mpsc::Sender<ResponsePromise>,
    shutdown: DropGuard,
    dispatcher: JoinHandle<()>,
    peer_addr: SocketAddr,
    _gauge: ConnectedGauge,
}

impl Connection {
    /// Open a socket to `addr` and start its dispatcher.
    pub(crate) async fn open(addr: SocketAddr, config: &BrokerConfig) -> Result<Self> {
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        config.socket_options.apply(&socket)?;
        let stream = match config.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, socket.connect(addr))
                .await
                .map_err(|_| BrokerError::Timeout)??,
            None => socket.connect(addr).await?,
        };
        let peer_addr = stream.peer_addr().unwrap_or(addr);
        let (read_half, write_half) = stream.into_split();

        let (responses, queue) = mpsc::channel(config.queue_capacity);
        let token = CancellationToken::new();
        let frames = FramedRead::new(read_half, config.frames.response_codec());
        let dispatcher = tokio::spawn(receive_responses(frames, queue, token.clone()));

        Ok(Self {
            writer: FramedWrite::new(write_half, config.frames.request_codec()),
            correlation_id: 0,
            responses,
            shutdown: token.drop_guard(),
            dispatcher,
            peer_addr,
            _gauge: ConnectedGauge::new(),
        })
    }

    pub(crate) fn peer_addr(&self) -> SocketAddr { self.peer_addr }

    /// A handle on the pending-response queue used to reserve a slot before
    /// the connection lock is taken.
    pub(crate) fn queue(&self) -> mpsc::Sender<ResponsePromise> { self.responses.clone() }

    /// Returns true when `queue` belongs to this connection.
    pub(crate) fn feeds(&self, queue: &mpsc::Sender<ResponsePromise>) -> bool {
        self.responses.same_channel(queue)
    }

    #[cfg(test)]
    pub(crate) fn set_correlation_id(&mut self, correlation_id: i32) {
        self.correlation_id = correlation_id;
    }

    /// Write one request frame and return the correlation id it carried.
    pub(crate) async fn write_request(
        &mut self,
        api_key: ApiKey,
        api_version: i16,
        client_id: &str,
        body: &[u8],
    ) -> Result<i32> {
        let correlation_id = self
            .buffer_request(api_key, api_version, client_id, body)
            .await?;
        SinkExt::<Bytes>::flush(&mut self.writer).await?;
        Ok(correlation_id)
    }

    /// Write one request frame and queue a promise for its response through
    /// `permit`.
    ///
    /// The promise is queued in the same step that the frame enters the write
    /// buffer. If the caller is dropped while the buffer is flushing, the
    /// frame stays buffered and goes out with the next write or on shutdown,
    /// so the queue never loses step with the wire.
    pub(crate) async fn write_request_awaiting(
        &mut self,
        permit: mpsc::Permit<'_, ResponsePromise>,
        api_key: ApiKey,
        api_version: i16,
        client_id: &str,
        body: &[u8],
    ) -> Result<PendingResponse> {
        let correlation_id = self
            .buffer_request(api_key, api_version, client_id, body)
            .await?;
        let (promise, pending) = ResponsePromise::new(correlation_id);
        permit.send(promise);
        SinkExt::<Bytes>::flush(&mut self.writer).await?;
        Ok(pending)
    }

    /// Encode a frame into the write buffer and advance the counter.
    ///
    /// Nothing is buffered if this future is dropped before it completes.
    async fn buffer_request(
        &mut self,
        api_key: ApiKey,
        api_version: i16,
        client_id: &str,
        body: &[u8],
    ) -> Result<i32> {
        let correlation_id = self.correlation_id;
        let header = RequestHeader {
            api_key: api_key.0,
            api_version,
            correlation_id,
            client_id,
        };
        let frame = encode_request(&header, body)?;
        self.writer.feed(frame).await?;
        self.correlation_id = correlation_id.wrapping_add(1);
        metrics::inc_requests(api_key);
        Span::current().record("correlation_id", correlation_id);
        Ok(correlation_id)
    }

    /// Stop the dispatcher and close the socket.
    ///
    /// Outstanding responses may arrive for up to `drain_timeout`; whatever
    /// remains afterwards resolves with [`BrokerError::ConnectionClosed`].
    /// Buffered request bytes are flushed before the write half closes.
    pub(crate) async fn shutdown(self, drain_timeout: Option<Duration>) -> Result<()> {
        let Self {
            mut writer,
            responses,
            shutdown,
            mut dispatcher,
            peer_addr,
            ..
        } = self;
        let token = shutdown.disarm();
        drop(responses);

        let drained = match drain_timeout {
            Some(limit) => tokio::time::timeout(limit, &mut dispatcher).await.ok(),
            None => None,
        };
        let joined = match drained {
            Some(joined) => joined,
            None => {
                token.cancel();
                dispatcher.await
            }
        };
        if let Err(e) = joined {
            warn!("response dispatcher ended abnormally: peer={peer_addr}, error={e}");
        }
        SinkExt::<Bytes>::close(&mut writer).await?;
        Ok(())
    }
}

/// Holds the connected-brokers gauge up for as long as a connection lives.
#[derive(Debug)]
struct ConnectedGauge;

impl ConnectedGauge {
    fn new() -> Self {
        metrics::inc_connections();
        Self
    }
}

impl Drop for ConnectedGauge {
    fn drop(&mut self) { metrics::dec_connections(); }
}
