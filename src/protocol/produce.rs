//! Produce request and response.

use super::{ApiKey, Request};

/// Acknowledgement level a produce request asks the broker for.
///
/// Encoded as the raw `i16` the broker expects.
///
/// # Examples
///
/// ```
/// use brokerlink::protocol::RequiredAcks;
///
/// assert!(!RequiredAcks::NO_RESPONSE.expects_response());
/// assert!(RequiredAcks::WAIT_FOR_ALL.expects_response());
/// ```
#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequiredAcks(pub i16);

impl RequiredAcks {
    /// The broker never answers; the request is fire-and-forget.
    pub const NO_RESPONSE: Self = Self(0);
    /// Answer once the leader has written the records.
    pub const WAIT_FOR_LOCAL: Self = Self(1);
    /// Answer once every in-sync replica has the records.
    pub const WAIT_FOR_ALL: Self = Self(-1);

    /// Whether the broker sends a response at this level.
    #[must_use]
    pub fn expects_response(self) -> bool { self != Self::NO_RESPONSE }
}

impl Default for RequiredAcks {
    fn default() -> Self { Self::WAIT_FOR_LOCAL }
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProduceRequest {
    pub required_acks: RequiredAcks,
    /// Milliseconds the broker may wait for the acknowledgements.
    pub timeout_ms: i32,
    pub topics: Vec<ProduceTopic>,
}

impl Request for ProduceRequest {
    const API_KEY: ApiKey = ApiKey::PRODUCE;
    type Response = ProduceResponse;

    fn expects_response(&self) -> bool { self.required_acks.expects_response() }
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct ProduceTopic {
    pub topic: String,
    pub partitions: Vec<ProducePartition>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct ProducePartition {
    pub partition: i32,
    /// Encoded record set, opaque to the connection.
    pub records: Vec<u8>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProduceResponse {
    pub topics: Vec<ProduceTopicResult>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct ProduceTopicResult {
    pub topic: String,
    pub partitions: Vec<ProducePartitionResult>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct ProducePartitionResult {
    pub partition: i32,
    pub error_code: i16,
    /// Offset assigned to the first record.
    pub base_offset: i64,
}
