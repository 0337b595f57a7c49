//! Message serialization traits.
//!
//! This module defines the [`Serializer`] trait, the encoding collaborator the
//! broker uses for request and response bodies. A basic [`BincodeSerializer`]
//! implementation is provided as the default.

use crate::{error::BoxError, message::Message};

/// Trait for serializing and deserializing message bodies.
pub trait Serializer {
    /// Serialize `value` into a byte vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    fn serialize<M: Message>(&self, value: &M) -> Result<Vec<u8>, BoxError>;

    /// Deserialize a message from `bytes`, returning the message and bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be parsed into a message.
    fn deserialize<M: Message>(&self, bytes: &[u8]) -> Result<(M, usize), BoxError>;
}

/// Serializer using `bincode` with [`wire_config`](crate::message::wire_config).
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeSerializer;

impl Serializer for BincodeSerializer {
    fn serialize<M: Message>(&self, value: &M) -> Result<Vec<u8>, BoxError> {
        value.to_bytes().map_err(|e| Box::new(e) as BoxError)
    }

    fn deserialize<M: Message>(&self, bytes: &[u8]) -> Result<(M, usize), BoxError> {
        M::from_bytes(bytes).map_err(|e| Box::new(e) as BoxError)
    }
}
