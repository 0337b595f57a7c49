//! Fixed-layout request and response headers.

use bytes::BytesMut;

use crate::{
    byte_order::NetworkOrder,
    error::{BrokerError, DecodingError},
};

/// Size of the response header on the wire.
pub const RESPONSE_HEADER_LEN: usize = 8;

/// Bytes of the response length field that belong to the correlation id.
const CORRELATION_ID_LEN: i32 = 4;

/// Header preceding every request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestHeader<'a> {
    /// Identifies the request kind.
    pub api_key: i16,
    /// Version of the request layout.
    pub api_version: i16,
    /// Per-connection sequence number echoed by the broker.
    pub correlation_id: i32,
    /// Caller-supplied client identifier.
    pub client_id: &'a str,
}

impl RequestHeader<'_> {
    /// Number of bytes [`encode`](Self::encode) appends.
    #[must_use]
    pub fn encoded_len(&self) -> usize { 2 + 2 + 4 + 2 + self.client_id.len() }

    /// Append the header to `dst`.
    ///
    /// The client id is written as an `i16` length followed by its UTF-8
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::ClientIdTooLong`] if the client id is longer
    /// than `i16::MAX` bytes.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<(), BrokerError> {
        let client_id_len = i16::try_from(self.client_id.len())
            .map_err(|_| BrokerError::ClientIdTooLong(self.client_id.len()))?;
        dst.reserve(self.encoded_len());
        dst.extend_from_slice(&self.api_key.to_network());
        dst.extend_from_slice(&self.api_version.to_network());
        dst.extend_from_slice(&self.correlation_id.to_network());
        dst.extend_from_slice(&client_id_len.to_network());
        dst.extend_from_slice(self.client_id.as_bytes());
        Ok(())
    }
}

/// Header preceding every response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Frame length after the length field, correlation id included.
    pub length: i32,
    /// Correlation id of the request this response answers.
    pub correlation_id: i32,
}

impl ResponseHeader {
    /// Decode the header from its 8 wire bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use brokerlink::frame::ResponseHeader;
    ///
    /// let header = ResponseHeader::decode([0, 0, 0, 6, 0, 0, 0, 9]);
    /// assert_eq!(header.length, 6);
    /// assert_eq!(header.correlation_id, 9);
    /// assert_eq!(header.body_len(), 2);
    /// ```
    #[must_use]
    pub fn decode(bytes: [u8; RESPONSE_HEADER_LEN]) -> Self {
        let [l0, l1, l2, l3, c0, c1, c2, c3] = bytes;
        Self {
            length: i32::from_network([l0, l1, l2, l3]),
            correlation_id: i32::from_network([c0, c1, c2, c3]),
        }
    }

    /// Encode the header into its 8 wire bytes.
    #[must_use]
    pub fn encode(&self) -> [u8; RESPONSE_HEADER_LEN] {
        let [l0, l1, l2, l3] = self.length.to_network();
        let [c0, c1, c2, c3] = self.correlation_id.to_network();
        [l0, l1, l2, l3, c0, c1, c2, c3]
    }

    /// Check that the length covers the correlation id and fits
    /// `max_frame_length`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodingError::InvalidLength`] when the length is out of
    /// range.
    pub fn validate(self, max_frame_length: usize) -> Result<Self, DecodingError> {
        let in_range = self.length >= CORRELATION_ID_LEN
            && usize::try_from(self.length).is_ok_and(|len| len <= max_frame_length);
        if in_range {
            Ok(self)
        } else {
            Err(DecodingError::InvalidLength {
                length: self.length,
                max: max_frame_length,
            })
        }
    }

    /// Number of body bytes following the header.
    ///
    /// Zero for headers that would fail [`validate`](Self::validate).
    #[must_use]
    pub fn body_len(&self) -> usize {
        usize::try_from(self.length.saturating_sub(CORRELATION_ID_LEN)).unwrap_or_default()
    }
}
