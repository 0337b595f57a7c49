//! Single-use delivery slot for one in-flight response.

use std::time::Duration;

use bytes::Bytes;
use log::debug;
use tokio::sync::oneshot;

use crate::{error::BrokerError, metrics};

type Reply = Result<Bytes, BrokerError>;

/// Dispatcher-side half of a pending response.
///
/// Consuming `self` in [`fulfil`](Self::fulfil) and [`fail`](Self::fail)
/// guarantees exactly one outcome is delivered.
#[derive(Debug)]
pub(crate) struct ResponsePromise {
    correlation_id: i32,
    reply: oneshot::Sender<Reply>,
}

/// Caller-side half of a pending response.
#[derive(Debug)]
pub(crate) struct PendingResponse {
    correlation_id: i32,
    reply: oneshot::Receiver<Reply>,
}

impl ResponsePromise {
    /// Create a promise for the request sent with `correlation_id`.
    pub(crate) fn new(correlation_id: i32) -> (Self, PendingResponse) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                correlation_id,
                reply: tx,
            },
            PendingResponse {
                correlation_id,
                reply: rx,
            },
        )
    }

    pub(crate) fn correlation_id(&self) -> i32 { self.correlation_id }

    /// Deliver the raw response body.
    pub(crate) fn fulfil(self, body: Bytes) {
        metrics::inc_responses();
        self.deliver(Ok(body));
    }

    /// Deliver a failure.
    pub(crate) fn fail(self, error: BrokerError) {
        metrics::inc_errors(error.kind());
        self.deliver(Err(error));
    }

    fn deliver(self, reply: Reply) {
        if self.reply.send(reply).is_err() {
            debug!(
                "response discarded: correlation_id={}, caller stopped waiting",
                self.correlation_id
            );
        }
    }
}

impl PendingResponse {
    #[cfg(test)]
    pub(crate) fn correlation_id(&self) -> i32 { self.correlation_id }

    /// Wait for the dispatcher to resolve this response.
    ///
    /// A dispatcher that exits without resolving the promise surfaces as
    /// [`BrokerError::ConnectionClosed`].
    pub(crate) async fn wait(self, limit: Option<Duration>) -> Result<Bytes, BrokerError> {
        let correlation_id = self.correlation_id;
        let outcome = match limit {
            Some(limit) => tokio::time::timeout(limit, self.reply)
                .await
                .map_err(|_| {
                    debug!("response wait timed out: correlation_id={correlation_id}");
                    BrokerError::Timeout
                })?,
            None => self.reply.await,
        };
        outcome.unwrap_or(Err(BrokerError::ConnectionClosed))
    }
}
