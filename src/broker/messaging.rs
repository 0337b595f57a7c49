//! Request writing and response awaiting for [`Broker`].

use super::{
    Broker,
    connection::Connection,
    promise::PendingResponse,
    tracing_helpers::{call_span, instrumented, send_span},
};
use crate::{
    error::{BrokerError, DecodingError, Result},
    message::Message,
    protocol::Request,
    serializer::Serializer,
};

impl<S> Broker<S>
where
    S: Serializer,
{
    /// Send a request and wait for its response when one is expected.
    ///
    /// Returns `Ok(None)` without waiting when
    /// [`Request::expects_response`] is false.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::NotConnected`] if no socket is open, an
    /// encoding or transport error if the request cannot be written, or the
    /// failure the dispatcher delivered for this request.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use brokerlink::{Broker, protocol::MetadataRequest};
    ///
    /// # async fn demo() -> brokerlink::Result<()> {
    /// let broker = Broker::new("localhost", 9092);
    /// broker.connect().await?;
    /// let metadata = broker
    ///     .request("demo", &MetadataRequest { topics: vec![] })
    ///     .await?;
    /// assert!(metadata.is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request<R: Request>(
        &self,
        client_id: &str,
        request: &R,
    ) -> Result<Option<R::Response>> {
        self.send_and_receive(client_id, request, request.expects_response())
            .await
    }

    /// Send a request that is always answered and wait for the answer.
    pub(crate) async fn call<R: Request>(
        &self,
        client_id: &str,
        request: &R,
    ) -> Result<R::Response> {
        self.traced_call::<R, _, _>(async {
            let pending = self.send_awaiting(client_id, request).await?;
            self.receive(pending).await
        })
        .await
    }

    pub(crate) async fn send_and_receive<R: Request>(
        &self,
        client_id: &str,
        request: &R,
        wants_response: bool,
    ) -> Result<Option<R::Response>> {
        self.traced_call::<R, _, _>(async {
            match self.send(client_id, request, wants_response).await? {
                Some(pending) => self.receive(pending).await.map(Some),
                None => Ok(None),
            }
        })
        .await
    }

    /// Write a request, queueing a promise for its response if wanted.
    ///
    /// Writing the frame, advancing the correlation counter and queueing the
    /// promise happen under one lock, so queue order always matches wire
    /// order. Waiting for queue space happens before the lock is taken.
    pub(crate) async fn send<R: Request>(
        &self,
        client_id: &str,
        request: &R,
        wants_response: bool,
    ) -> Result<Option<PendingResponse>> {
        if wants_response {
            return self.send_awaiting(client_id, request).await.map(Some);
        }
        let body = self.encode(request)?;
        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(BrokerError::NotConnected)?;
        let span = send_span(&self.config.tracing, R::API_KEY, body.len());
        instrumented(span, self.config.tracing.send_timing, async {
            connection
                .write_request(R::API_KEY, R::API_VERSION, client_id, &body)
                .await
                .map(|_| None)
        })
        .await
    }

    async fn send_awaiting<R: Request>(
        &self,
        client_id: &str,
        request: &R,
    ) -> Result<PendingResponse> {
        let body = self.encode(request)?;
        let queue = self
            .connection
            .lock()
            .await
            .as_ref()
            .map(Connection::queue)
            .ok_or(BrokerError::NotConnected)?;
        let permit = queue
            .reserve()
            .await
            .map_err(|_| BrokerError::ConnectionClosed)?;

        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(BrokerError::NotConnected)?;
        if !connection.feeds(&queue) {
            return Err(BrokerError::ConnectionClosed);
        }
        let span = send_span(&self.config.tracing, R::API_KEY, body.len());
        instrumented(span, self.config.tracing.send_timing, async {
            connection
                .write_request_awaiting(permit, R::API_KEY, R::API_VERSION, client_id, &body)
                .await
        })
        .await
    }

    fn encode<R: Request>(&self, request: &R) -> Result<Vec<u8>> {
        self.serializer
            .serialize(request)
            .map_err(BrokerError::Serialize)
    }

    async fn receive<M: Message>(&self, pending: PendingResponse) -> Result<M> {
        let body = pending.wait(self.config.request_timeout).await?;
        let (message, consumed) = self
            .serializer
            .deserialize::<M>(&body)
            .map_err(BrokerError::Deserialize)?;
        if consumed != body.len() {
            return Err(DecodingError::TrailingBytes {
                remaining: body.len() - consumed,
            }
            .into());
        }
        Ok(message)
    }

    async fn traced_call<R, T, F>(&self, exchange: F) -> Result<T>
    where
        R: Request,
        F: Future<Output = Result<T>>,
    {
        let span = call_span(&self.config.tracing, R::API_KEY);
        instrumented(span, self.config.tracing.call_timing, exchange).await
    }
}
