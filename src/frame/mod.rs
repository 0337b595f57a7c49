//! Request and response framing.
//!
//! Requests are written as a 4-byte big-endian length prefix followed by a
//! [`RequestHeader`] and the serialized body. Responses start with an 8-byte
//! [`ResponseHeader`] whose length covers the correlation id and the body.

mod codec;
mod header;

pub use codec::{FrameConfig, ResponseCodec, ResponseFrame, encode_request};
pub use header::{RESPONSE_HEADER_LEN, RequestHeader, ResponseHeader};

#[cfg(test)]
mod tests;
