//! Codecs for the request and response directions of a broker connection.

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::{Decoder, LengthDelimitedCodec};

use super::header::{RESPONSE_HEADER_LEN, RequestHeader, ResponseHeader};
use crate::error::BrokerError;

const MIN_FRAME_LENGTH: usize = 64;
const MAX_FRAME_LENGTH: usize = 0x7fff_ffff;
const DEFAULT_MAX_FRAME_LENGTH: usize = 100 * 1024 * 1024;
const LENGTH_FIELD_LEN: usize = 4;

/// Frame size limits shared by both directions of a connection.
///
/// # Examples
///
/// ```
/// use brokerlink::frame::FrameConfig;
///
/// let frames = FrameConfig::default().max_frame_length(2048);
/// assert_eq!(frames.max_frame_length_value(), 2048);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameConfig {
    max_frame_length: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_length: DEFAULT_MAX_FRAME_LENGTH,
        }
    }
}

impl FrameConfig {
    /// Set the maximum frame length for encoding and decoding.
    ///
    /// The value is clamped between 64 bytes and `i32::MAX`, the largest
    /// length a response header can carry.
    #[must_use]
    pub fn max_frame_length(mut self, max_frame_length: usize) -> Self {
        self.max_frame_length = max_frame_length.clamp(MIN_FRAME_LENGTH, MAX_FRAME_LENGTH);
        self
    }

    /// Return the configured maximum frame length.
    #[must_use]
    pub const fn max_frame_length_value(&self) -> usize { self.max_frame_length }

    /// Build the codec that prefixes outgoing requests with their length.
    #[must_use]
    pub fn request_codec(&self) -> LengthDelimitedCodec {
        LengthDelimitedCodec::builder()
            .length_field_length(LENGTH_FIELD_LEN)
            .big_endian()
            .max_frame_length(self.max_frame_length)
            .new_codec()
    }

    /// Build the codec that splits incoming bytes into response frames.
    #[must_use]
    pub fn response_codec(&self) -> ResponseCodec { ResponseCodec::new(self.max_frame_length) }
}

/// Assemble a request frame body: header followed by the serialized message.
///
/// # Errors
///
/// Returns [`BrokerError::ClientIdTooLong`] if the header cannot be encoded.
pub fn encode_request(header: &RequestHeader<'_>, body: &[u8]) -> Result<Bytes, BrokerError> {
    let mut buf = BytesMut::with_capacity(header.encoded_len() + body.len());
    header.encode(&mut buf)?;
    buf.extend_from_slice(body);
    Ok(buf.freeze())
}

/// One response read off the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseFrame {
    /// Decoded header.
    pub header: ResponseHeader,
    /// Raw body bytes, excluding the header.
    pub body: Bytes,
}

#[derive(Clone, Copy, Debug)]
enum DecodeState {
    Header,
    Body(ResponseHeader),
}

/// Decoder reading an 8-byte [`ResponseHeader`] and then `length - 4` body
/// bytes.
///
/// A header with an out-of-range length is a decoding error. Because frame
/// boundaries are lost at that point, the error ends the stream.
#[derive(Debug)]
pub struct ResponseCodec {
    max_frame_length: usize,
    state: DecodeState,
}

impl ResponseCodec {
    /// Create a decoder accepting frames up to `max_frame_length` bytes.
    #[must_use]
    pub fn new(max_frame_length: usize) -> Self {
        Self {
            max_frame_length,
            state: DecodeState::Header,
        }
    }

    fn decode_header(&self, src: &mut BytesMut) -> Result<Option<ResponseHeader>, BrokerError> {
        if src.len() < RESPONSE_HEADER_LEN {
            src.reserve(RESPONSE_HEADER_LEN - src.len());
            return Ok(None);
        }
        let mut raw = [0u8; RESPONSE_HEADER_LEN];
        raw.copy_from_slice(&src[..RESPONSE_HEADER_LEN]);
        let header = ResponseHeader::decode(raw).validate(self.max_frame_length)?;
        src.advance(RESPONSE_HEADER_LEN);
        Ok(Some(header))
    }
}

impl Decoder for ResponseCodec {
    type Item = ResponseFrame;
    type Error = BrokerError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let header = match self.state {
            DecodeState::Header => {
                let Some(header) = self.decode_header(src)? else {
                    return Ok(None);
                };
                self.state = DecodeState::Body(header);
                header
            }
            DecodeState::Body(header) => header,
        };

        let body_len = header.body_len();
        if src.len() < body_len {
            src.reserve(body_len - src.len());
            return Ok(None);
        }
        self.state = DecodeState::Header;
        Ok(Some(ResponseFrame {
            header,
            body: src.split_to(body_len).freeze(),
        }))
    }
}
