//! A scripted broker peer speaking the request/response framing.

use std::{io, net::SocketAddr};

use brokerlink::{Broker, BrokerBuilder, Message, frame::ResponseHeader};
use bytes::{Buf, Bytes};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

/// Listener standing in for a broker.
pub struct FakeBroker {
    listener: TcpListener,
    addr: SocketAddr,
}

impl FakeBroker {
    /// Bind to an ephemeral port on the loopback interface.
    pub async fn bind() -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    pub fn addr(&self) -> SocketAddr { self.addr }

    pub fn port(&self) -> i32 { i32::from(self.addr.port()) }

    /// Start building a handle that targets this peer.
    pub fn broker(&self) -> BrokerBuilder { Broker::builder("127.0.0.1", self.port()) }

    /// Accept the next client connection.
    pub async fn accept(&self) -> io::Result<PeerConnection> {
        let (stream, _) = self.listener.accept().await?;
        Ok(PeerConnection { stream })
    }
}

/// One request as written by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub api_key: i16,
    pub api_version: i16,
    pub correlation_id: i32,
    pub client_id: String,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Decode the body with the wire configuration.
    ///
    /// # Panics
    ///
    /// Panics if the body is not a complete `M`.
    pub fn decode_body<M: Message>(&self) -> M {
        let (message, consumed) = M::from_bytes(&self.body).expect("decode request body");
        assert_eq!(consumed, self.body.len(), "request body has trailing bytes");
        message
    }
}

/// Server side of an accepted client connection.
pub struct PeerConnection {
    stream: TcpStream,
}

impl PeerConnection {
    /// Read the next length-prefixed request frame.
    pub async fn read_request(&mut self) -> io::Result<RecordedRequest> {
        let len = self.stream.read_u32().await?;
        let len = usize::try_from(len).map_err(io::Error::other)?;
        let mut frame = vec![0; len];
        self.stream.read_exact(&mut frame).await?;
        let mut buf = Bytes::from(frame);
        if buf.remaining() < 10 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "short request header"));
        }
        let api_key = buf.get_i16();
        let api_version = buf.get_i16();
        let correlation_id = buf.get_i32();
        let client_id_len = usize::try_from(buf.get_i16()).map_err(io::Error::other)?;
        if buf.remaining() < client_id_len {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "short client id"));
        }
        let client_id = String::from_utf8(buf.split_to(client_id_len).to_vec())
            .map_err(io::Error::other)?;
        Ok(RecordedRequest {
            api_key,
            api_version,
            correlation_id,
            client_id,
            body: buf,
        })
    }

    /// Write a well-formed response frame carrying `body`.
    pub async fn write_response(&mut self, correlation_id: i32, body: &[u8]) -> io::Result<()> {
        self.write_raw(&response_frame(correlation_id, body)).await
    }

    /// Encode `message` with the wire configuration and send it as a response.
    pub async fn reply<M: Message>(&mut self, correlation_id: i32, message: &M) -> io::Result<()> {
        let body = message.to_bytes().map_err(io::Error::other)?;
        self.write_response(correlation_id, &body).await
    }

    /// Write arbitrary bytes, for malformed frames.
    pub async fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes).await?;
        self.stream.flush().await
    }

    /// Close the peer's end of the connection.
    pub async fn close(mut self) -> io::Result<()> { self.stream.shutdown().await }
}

/// Build a response frame: length, correlation id, body.
///
/// # Panics
///
/// Panics if `body` is too large for a frame.
pub fn response_frame(correlation_id: i32, body: &[u8]) -> Vec<u8> {
    let length = i32::try_from(body.len() + 4).expect("body fits a frame");
    let mut frame = ResponseHeader {
        length,
        correlation_id,
    }
    .encode()
    .to_vec();
    frame.extend_from_slice(body);
    frame
}
