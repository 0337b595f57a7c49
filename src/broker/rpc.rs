//! Typed wrappers for each supported request kind.

use super::Broker;
use crate::{
    error::Result,
    protocol::{
        FetchRequest,
        FetchResponse,
        MetadataRequest,
        MetadataResponse,
        OffsetCommitRequest,
        OffsetCommitResponse,
        OffsetFetchRequest,
        OffsetFetchResponse,
        OffsetRequest,
        OffsetResponse,
        ProduceRequest,
        ProduceResponse,
    },
    serializer::Serializer,
};

impl<S> Broker<S>
where
    S: Serializer,
{
    /// Ask the broker for cluster and topic metadata.
    ///
    /// # Errors
    ///
    /// Returns any error [`Broker::request`] can return.
    pub async fn get_metadata(
        &self,
        client_id: &str,
        request: &MetadataRequest,
    ) -> Result<MetadataResponse> {
        self.call(client_id, request).await
    }

    /// Ask the broker which offsets are available in the given partitions.
    ///
    /// # Errors
    ///
    /// Returns any error [`Broker::request`] can return.
    pub async fn get_available_offsets(
        &self,
        client_id: &str,
        request: &OffsetRequest,
    ) -> Result<OffsetResponse> {
        self.call(client_id, request).await
    }

    /// Append records to partitions.
    ///
    /// With [`RequiredAcks::NO_RESPONSE`](crate::protocol::RequiredAcks::NO_RESPONSE)
    /// the broker never answers: the call returns `Ok(None)` once the
    /// request is written.
    ///
    /// # Errors
    ///
    /// Returns any error [`Broker::request`] can return.
    pub async fn produce(
        &self,
        client_id: &str,
        request: &ProduceRequest,
    ) -> Result<Option<ProduceResponse>> {
        self.request(client_id, request).await
    }

    /// Read records from partitions.
    ///
    /// # Errors
    ///
    /// Returns any error [`Broker::request`] can return.
    pub async fn fetch(&self, client_id: &str, request: &FetchRequest) -> Result<FetchResponse> {
        self.call(client_id, request).await
    }

    /// Store offsets for a consumer group.
    ///
    /// # Errors
    ///
    /// Returns any error [`Broker::request`] can return.
    pub async fn commit_offset(
        &self,
        client_id: &str,
        request: &OffsetCommitRequest,
    ) -> Result<OffsetCommitResponse> {
        self.call(client_id, request).await
    }

    /// Read the offsets a consumer group has stored.
    ///
    /// # Errors
    ///
    /// Returns any error [`Broker::request`] can return.
    pub async fn fetch_offset(
        &self,
        client_id: &str,
        request: &OffsetFetchRequest,
    ) -> Result<OffsetFetchResponse> {
        self.call(client_id, request).await
    }
}
