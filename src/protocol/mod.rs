//! Typed request and response catalogue.
//!
//! Each request pairs an API key with the response shape the broker answers
//! it with. Bodies are plain [`Message`] structures; the broker connection
//! frames them but never inspects their contents, with one exception:
//! [`Request::expects_response`] lets a produce request opt out of a reply.

mod fetch;
mod metadata;
mod offset_commit;
mod offset_fetch;
mod offsets;
mod produce;

pub use fetch::{
    FetchPartition,
    FetchPartitionData,
    FetchRequest,
    FetchResponse,
    FetchTopic,
    FetchTopicData,
};
pub use metadata::{
    BrokerMetadata,
    MetadataRequest,
    MetadataResponse,
    PartitionMetadata,
    TopicMetadata,
};
pub use offset_commit::{
    OffsetCommitPartition,
    OffsetCommitPartitionResult,
    OffsetCommitRequest,
    OffsetCommitResponse,
    OffsetCommitTopic,
    OffsetCommitTopicResult,
};
pub use offset_fetch::{
    OffsetFetchPartitionResult,
    OffsetFetchRequest,
    OffsetFetchResponse,
    OffsetFetchTopic,
    OffsetFetchTopicResult,
};
pub use offsets::{
    OffsetPartition,
    OffsetPartitionResult,
    OffsetRequest,
    OffsetResponse,
    OffsetTopic,
    OffsetTopicResult,
};
pub use produce::{
    ProducePartition,
    ProducePartitionResult,
    ProduceRequest,
    ProduceResponse,
    ProduceTopic,
    ProduceTopicResult,
    RequiredAcks,
};

use crate::message::Message;

/// Numeric identifiers of the supported request kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ApiKey(pub i16);

impl ApiKey {
    /// Append records to partitions.
    pub const PRODUCE: Self = Self(0);
    /// Read records from partitions.
    pub const FETCH: Self = Self(1);
    /// List offsets available in partitions.
    pub const OFFSETS: Self = Self(2);
    /// Describe brokers and topic layout.
    pub const METADATA: Self = Self(3);
    /// Store a consumer group's offsets.
    pub const OFFSET_COMMIT: Self = Self(8);
    /// Read a consumer group's stored offsets.
    pub const OFFSET_FETCH: Self = Self(9);
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

/// A request body that can be sent to a broker.
pub trait Request: Message + Sync {
    /// Request kind written into the header.
    const API_KEY: ApiKey;
    /// Layout version written into the header.
    const API_VERSION: i16 = 0;

    /// Shape the broker answers this request with.
    type Response: Message + Send;

    /// Whether the broker sends a response frame for this request.
    ///
    /// Returning `false` makes the request fire-and-forget: no promise is
    /// queued and the caller returns as soon as the bytes are written.
    fn expects_response(&self) -> bool { true }
}
