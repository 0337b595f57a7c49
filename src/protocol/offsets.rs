//! Offset listing request and response.

use super::{ApiKey, Request};

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetRequest {
    /// Always `-1` for ordinary clients.
    pub replica_id: i32,
    pub topics: Vec<OffsetTopic>,
}

impl Default for OffsetRequest {
    fn default() -> Self {
        Self {
            replica_id: -1,
            topics: Vec::new(),
        }
    }
}

impl Request for OffsetRequest {
    const API_KEY: ApiKey = ApiKey::OFFSETS;
    type Response = OffsetResponse;
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetTopic {
    pub topic: String,
    pub partitions: Vec<OffsetPartition>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetPartition {
    pub partition: i32,
    /// Timestamp in milliseconds; `-1` for the latest offset, `-2` for the
    /// earliest.
    pub time: i64,
    pub max_offsets: i32,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetResponse {
    pub topics: Vec<OffsetTopicResult>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetTopicResult {
    pub topic: String,
    pub partitions: Vec<OffsetPartitionResult>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct OffsetPartitionResult {
    pub partition: i32,
    pub error_code: i16,
    pub offsets: Vec<i64>,
}
