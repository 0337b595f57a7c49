//! Message encoding for request and response bodies.

use bincode::{
    BorrowDecode,
    Encode,
    borrow_decode_from_slice,
    config::{self, Config},
    encode_to_vec,
    error::{DecodeError, EncodeError},
};

/// Bincode configuration used for message bodies.
///
/// Integers are fixed-width and big-endian so bodies share the byte order
/// of the frame headers.
#[must_use]
pub fn wire_config() -> impl Config { config::standard().with_big_endian().with_fixed_int_encoding() }

/// Wrapper trait for request and response body types.
///
/// Any type deriving [`Encode`] and [`BorrowDecode`] automatically implements
/// this trait via a blanket implementation. The default methods serialize
/// using [`wire_config`].
pub trait Message: Encode + for<'de> BorrowDecode<'de, ()> {
    /// Serialize the message into a byte vector.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if serialization fails.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> { encode_to_vec(self, wire_config()) }

    /// Deserialize a message from a byte slice, returning the message and
    /// the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if deserialization fails.
    fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), DecodeError>
    where
        Self: Sized,
    {
        borrow_decode_from_slice(bytes, wire_config())
    }
}

impl<T> Message for T where for<'de> T: Encode + BorrowDecode<'de, ()> {}

#[cfg(test)]
mod tests {
    use super::Message;

    #[derive(bincode::Encode, bincode::BorrowDecode, Debug, PartialEq)]
    struct Sample {
        id: i32,
        level: i16,
    }

    #[test]
    fn integers_are_fixed_width_big_endian() {
        let bytes = Sample { id: 1, level: -1 }
            .to_bytes()
            .expect("encode sample");
        assert_eq!(bytes, vec![0, 0, 0, 1, 0xff, 0xff]);
    }

    #[test]
    fn decode_reports_bytes_consumed() {
        let mut bytes = Sample { id: 3, level: 2 }.to_bytes().expect("encode sample");
        bytes.push(0xaa);
        let (decoded, consumed) = Sample::from_bytes(&bytes).expect("decode sample");
        assert_eq!(decoded, Sample { id: 3, level: 2 });
        assert_eq!(consumed, 6);
    }
}
