//! Consumer group offset commit request and response.

use super::{ApiKey, Request};

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetCommitRequest {
    pub consumer_group: String,
    pub topics: Vec<OffsetCommitTopic>,
}

impl Request for OffsetCommitRequest {
    const API_KEY: ApiKey = ApiKey::OFFSET_COMMIT;
    type Response = OffsetCommitResponse;
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetCommitTopic {
    pub topic: String,
    pub partitions: Vec<OffsetCommitPartition>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetCommitPartition {
    pub partition: i32,
    pub offset: i64,
    /// Free-form string stored alongside the offset.
    pub metadata: String,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetCommitResponse {
    pub topics: Vec<OffsetCommitTopicResult>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetCommitTopicResult {
    pub topic: String,
    pub partitions: Vec<OffsetCommitPartitionResult>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetCommitPartitionResult {
    pub partition: i32,
    pub error_code: i16,
}
