//! Response dispatcher: the sole reader of a broker connection.
//!
//! The dispatcher consumes pending promises in the order their requests were
//! written and resolves each with the next response frame on the wire. The
//! broker answers requests on one connection in the order it receives them,
//! so queue position correlates a response with its request; the correlation
//! id in the header is only checked as an assertion. If the broker breaks
//! that ordering, responses are misattributed until a mismatch is seen.

use futures::StreamExt;
use log::{debug, warn};
use tokio::{io::AsyncRead, sync::mpsc};
use tokio_util::{codec::FramedRead, sync::CancellationToken};

use super::promise::ResponsePromise;
use crate::{
    error::{BrokerError, DecodingError},
    frame::{ResponseCodec, ResponseFrame},
};

/// Resolve queued promises until the queue closes or `shutdown` fires.
///
/// Failures only affect the promise being served. Once the read side has
/// failed, later promises resolve with [`BrokerError::Disconnected`] without
/// another read. Promises still queued when `shutdown` fires resolve with
/// [`BrokerError::ConnectionClosed`].
pub(crate) async fn receive_responses<R>(
    mut frames: FramedRead<R, ResponseCodec>,
    mut queue: mpsc::Receiver<ResponsePromise>,
    shutdown: CancellationToken,
) where
    R: AsyncRead + Unpin,
{
    let mut read_side_open = true;
    loop {
        let promise = tokio::select! {
            biased;
            () = shutdown.cancelled() => break,
            next = queue.recv() => match next {
                Some(promise) => promise,
                None => break,
            },
        };

        if !read_side_open {
            promise.fail(BrokerError::Disconnected);
            continue;
        }

        let next = tokio::select! {
            biased;
            () = shutdown.cancelled() => {
                promise.fail(BrokerError::ConnectionClosed);
                break;
            }
            next = frames.next() => next,
        };

        match next {
            Some(Ok(frame)) => deliver(promise, frame),
            Some(Err(error)) => {
                warn!(
                    "response read failed: correlation_id={}, error={error}",
                    promise.correlation_id()
                );
                read_side_open = false;
                promise.fail(error);
            }
            None => {
                debug!(
                    "connection closed by peer: correlation_id={}",
                    promise.correlation_id()
                );
                read_side_open = false;
                promise.fail(BrokerError::Disconnected);
            }
        }
    }

    queue.close();
    while let Some(promise) = queue.recv().await {
        promise.fail(BrokerError::ConnectionClosed);
    }
    debug!("response dispatcher stopped");
}

fn deliver(promise: ResponsePromise, frame: ResponseFrame) {
    let expected = promise.correlation_id();
    let received = frame.header.correlation_id;
    if received == expected {
        promise.fulfil(frame.body);
    } else {
        warn!("correlation id mismatch: expected={expected}, received={received}");
        promise.fail(DecodingError::CorrelationMismatch { expected, received }.into());
    }
}
