//! Consumer group offset fetch request and response.

use super::{ApiKey, Request};

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetFetchRequest {
    pub consumer_group: String,
    pub topics: Vec<OffsetFetchTopic>,
}

impl Request for OffsetFetchRequest {
    const API_KEY: ApiKey = ApiKey::OFFSET_FETCH;
    type Response = OffsetFetchResponse;
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetFetchTopic {
    pub topic: String,
    pub partitions: Vec<i32>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetFetchResponse {
    pub topics: Vec<OffsetFetchTopicResult>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetFetchTopicResult {
    pub topic: String,
    pub partitions: Vec<OffsetFetchPartitionResult>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetFetchPartitionResult {
    pub partition: i32,
    /// `-1` when the group has no stored offset.
    pub offset: i64,
    pub metadata: String,
    pub error_code: i16,
}
