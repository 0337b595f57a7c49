//! Network byte-order (big-endian) conversions for header integers.
//!
//! The `big_endian_bytes` lint expectation lives here once, so header code
//! can stay explicit about wire endianness without repeating annotations.

/// Fixed-width integers carried in frame headers.
///
/// # Examples
///
/// ```
/// use brokerlink::byte_order::NetworkOrder;
///
/// assert_eq!((-1i16).to_network(), [0xff, 0xff]);
/// assert_eq!(i32::from_network([0x12, 0x34, 0x56, 0x78]), 0x1234_5678);
/// ```
pub trait NetworkOrder: Sized {
    /// On-wire representation.
    type Bytes;

    /// Serialise in network byte order.
    fn to_network(self) -> Self::Bytes;

    /// Parse from network byte order.
    fn from_network(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_network_order {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl NetworkOrder for $ty {
                type Bytes = [u8; $len];

                #[expect(
                    clippy::big_endian_bytes,
                    reason = "Network byte order requires big-endian bytes."
                )]
                fn to_network(self) -> Self::Bytes { self.to_be_bytes() }

                #[expect(
                    clippy::big_endian_bytes,
                    reason = "Network byte order requires big-endian bytes."
                )]
                fn from_network(bytes: Self::Bytes) -> Self { <$ty>::from_be_bytes(bytes) }
            }
        )*
    };
}

impl_network_order!(i16 => 2, i32 => 4);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::NetworkOrder;

    #[rstest]
    #[case(0, [0x00, 0x00])]
    #[case(-1, [0xff, 0xff])]
    #[case(i16::MIN, [0x80, 0x00])]
    fn i16_is_big_endian(#[case] value: i16, #[case] wire: [u8; 2]) {
        assert_eq!(value.to_network(), wire);
        assert_eq!(i16::from_network(wire), value);
    }

    #[rstest]
    #[case(4, [0x00, 0x00, 0x00, 0x04])]
    #[case(-1, [0xff, 0xff, 0xff, 0xff])]
    #[case(i32::MAX, [0x7f, 0xff, 0xff, 0xff])]
    fn i32_is_big_endian(#[case] value: i32, #[case] wire: [u8; 4]) {
        assert_eq!(value.to_network(), wire);
        assert_eq!(i32::from_network(wire), value);
    }
}
