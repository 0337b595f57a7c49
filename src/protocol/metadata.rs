//! Cluster metadata request and response.

use super::{ApiKey, Request};

/// Ask for broker addresses and the layout of `topics` (all topics when
/// empty).
#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataRequest {
    /// Topics to describe.
    pub topics: Vec<String>,
}

impl Request for MetadataRequest {
    const API_KEY: ApiKey = ApiKey::METADATA;
    type Response = MetadataResponse;
}

/// Broker addresses and topic layout.
#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataResponse {
    /// Brokers in the cluster.
    pub brokers: Vec<BrokerMetadata>,
    /// Requested topics.
    pub topics: Vec<TopicMetadata>,
}

/// Identity of one broker as advertised in metadata.
#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct BrokerMetadata {
    /// Broker id.
    pub node_id: i32,
    /// Advertised host.
    pub host: String,
    /// Advertised port.
    pub port: i32,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct TopicMetadata {
    pub error_code: i16,
    pub name: String,
    pub partitions: Vec<PartitionMetadata>,
}

#[derive(bincode::Encode, bincode::BorrowDecode, Clone, Debug, PartialEq, Eq)]
pub struct PartitionMetadata {
    pub error_code: i16,
    pub partition: i32,
    /// Broker id of the leader, `-1` during leader election.
    pub leader: i32,
    pub replicas: Vec<i32>,
    pub isr: Vec<i32>,
}
