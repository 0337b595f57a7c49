//! Unit tests for request and response framing.

use bytes::{BufMut, Bytes, BytesMut};
use proptest::prelude::*;
use rstest::rstest;
use tokio_util::codec::{Decoder, Encoder};

use super::*;
use crate::error::{BrokerError, DecodingError};

const MIN_FRAME_LENGTH: usize = 64;
const MAX_FRAME_LENGTH: usize = 0x7fff_ffff;

fn response_bytes(correlation_id: i32, body: &[u8]) -> Vec<u8> {
    let length = i32::try_from(body.len() + 4).expect("body fits a frame");
    let mut bytes = ResponseHeader {
        length,
        correlation_id,
    }
    .encode()
    .to_vec();
    bytes.extend_from_slice(body);
    bytes
}

#[rstest]
#[case(1, MIN_FRAME_LENGTH)]
#[case(4096, 4096)]
#[case(usize::MAX, MAX_FRAME_LENGTH)]
fn frame_config_clamps_max_frame_length(#[case] input: usize, #[case] expected: usize) {
    let config = FrameConfig::default().max_frame_length(input);
    assert_eq!(config.max_frame_length_value(), expected);
}

#[test]
fn request_header_layout() {
    let header = RequestHeader {
        api_key: 3,
        api_version: 0,
        correlation_id: 258,
        client_id: "cli",
    };
    let mut buf = BytesMut::new();
    header.encode(&mut buf).expect("encode header");
    assert_eq!(
        &buf[..],
        &[0, 3, 0, 0, 0, 0, 1, 2, 0, 3, b'c', b'l', b'i'],
        "api key, version, correlation id, then length-prefixed client id"
    );
    assert_eq!(buf.len(), header.encoded_len());
}

#[test]
fn oversized_client_id_is_rejected() {
    let client_id = "x".repeat(usize::from(u16::MAX));
    let header = RequestHeader {
        api_key: 0,
        api_version: 0,
        correlation_id: 0,
        client_id: &client_id,
    };
    let err = encode_request(&header, &[]).expect_err("client id too long");
    assert!(matches!(err, BrokerError::ClientIdTooLong(len) if len == client_id.len()));
}

#[test]
fn request_codec_prefixes_total_length() {
    let header = RequestHeader {
        api_key: 1,
        api_version: 0,
        correlation_id: 0,
        client_id: "",
    };
    let frame = encode_request(&header, b"body").expect("encode request");
    let mut codec = FrameConfig::default().request_codec();
    let mut out = BytesMut::new();
    codec.encode(frame.clone(), &mut out).expect("encode frame");
    assert_eq!(&out[..4], &[0, 0, 0, 14]);
    assert_eq!(&out[4..], &frame[..]);
}

#[test]
fn response_codec_waits_for_header_and_body() {
    let mut codec = ResponseCodec::new(1024);
    let wire = response_bytes(5, b"payload");
    let mut buf = BytesMut::new();

    buf.extend_from_slice(&wire[..6]);
    assert!(codec.decode(&mut buf).expect("partial header").is_none());

    buf.extend_from_slice(&wire[6..10]);
    assert!(codec.decode(&mut buf).expect("partial body").is_none());

    buf.extend_from_slice(&wire[10..]);
    let frame = codec
        .decode(&mut buf)
        .expect("complete frame")
        .expect("frame produced");
    assert_eq!(frame.header.correlation_id, 5);
    assert_eq!(frame.body, Bytes::from_static(b"payload"));
    assert!(buf.is_empty());
}

#[test]
fn response_codec_accepts_empty_body() {
    let mut codec = ResponseCodec::new(1024);
    let mut buf = BytesMut::from(&response_bytes(0, &[])[..]);
    let frame = codec
        .decode(&mut buf)
        .expect("decode")
        .expect("frame produced");
    assert!(frame.body.is_empty());
}

#[rstest]
#[case::shorter_than_correlation_id(3)]
#[case::negative(-8)]
#[case::over_limit(2048)]
fn response_codec_rejects_invalid_length(#[case] length: i32) {
    let mut codec = ResponseCodec::new(1024);
    let mut buf = BytesMut::new();
    buf.put_slice(
        &ResponseHeader {
            length,
            correlation_id: 0,
        }
        .encode(),
    );
    let err = codec.decode(&mut buf).expect_err("invalid length");
    assert!(matches!(
        err,
        BrokerError::Decoding(DecodingError::InvalidLength { length: l, max: 1024 }) if l == length
    ));
}

proptest! {
    #[test]
    fn response_codec_is_insensitive_to_chunking(
        bodies in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..6),
        chunk in 1usize..16,
    ) {
        let mut wire = Vec::new();
        for (id, body) in bodies.iter().enumerate() {
            wire.extend(response_bytes(i32::try_from(id).expect("small id"), body));
        }

        let mut codec = ResponseCodec::new(1024);
        let mut buf = BytesMut::new();
        let mut frames = Vec::new();
        for piece in wire.chunks(chunk) {
            buf.extend_from_slice(piece);
            while let Some(frame) = codec.decode(&mut buf).expect("valid stream") {
                frames.push(frame);
            }
        }

        prop_assert_eq!(frames.len(), bodies.len());
        for (id, (frame, body)) in frames.iter().zip(&bodies).enumerate() {
            prop_assert_eq!(frame.header.correlation_id, i32::try_from(id).expect("small id"));
            prop_assert_eq!(&frame.body[..], &body[..]);
        }
    }
}
