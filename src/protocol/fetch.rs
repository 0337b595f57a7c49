//! Fetch request and response.

use super::{ApiKey, Request};

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// Always `-1` for ordinary clients.
    pub replica_id: i32,
    pub max_wait_ms: i32,
    pub min_bytes: i32,
    pub topics: Vec<FetchTopic>,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            replica_id: -1,
            max_wait_ms: 0,
            min_bytes: 0,
            topics: Vec::new(),
        }
    }
}

impl Request for FetchRequest {
    const API_KEY: ApiKey = ApiKey::FETCH;
    type Response = FetchResponse;
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct FetchTopic {
    pub topic: String,
    pub partitions: Vec<FetchPartition>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct FetchPartition {
    pub partition: i32,
    pub offset: i64,
    pub max_bytes: i32,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchResponse {
    pub topics: Vec<FetchTopicData>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct FetchTopicData {
    pub topic: String,
    pub partitions: Vec<FetchPartitionData>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct FetchPartitionData {
    pub partition: i32,
    pub error_code: i16,
    pub high_water_mark: i64,
    /// Encoded record set, opaque to the connection.
    pub records: Vec<u8>,
}
