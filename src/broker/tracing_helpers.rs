//! Span and timing helpers for broker operations.

use std::time::Instant;

use tracing::{Instrument, Level, Span};

use super::tracing_config::TracingConfig;
use crate::{error::Result, protocol::ApiKey};

/// Create a span at a level chosen at runtime.
///
/// Each arm expands a level-specific span macro so the span metadata stays
/// static.
macro_rules! dynamic_span {
    ($level:expr, $name:expr $(, $($field:tt)*)?) => {
        match $level {
            Level::ERROR => tracing::error_span!($name $(, $($field)*)?),
            Level::WARN  => tracing::warn_span!($name $(, $($field)*)?),
            Level::INFO  => tracing::info_span!($name $(, $($field)*)?),
            Level::DEBUG => tracing::debug_span!($name $(, $($field)*)?),
            Level::TRACE => tracing::trace_span!($name $(, $($field)*)?),
        }
    };
}

#[expect(
    clippy::cognitive_complexity,
    reason = "complexity from dynamic_span! macro expansion"
)]
pub(crate) fn connect_span(config: &TracingConfig, host: &str, port: i32) -> Span {
    dynamic_span!(
        config.connect_level,
        "broker.connect",
        broker.host = host,
        broker.port = port,
        peer.addr = tracing::field::Empty
    )
}

/// Span for writing one request; `correlation_id` is recorded once assigned.
#[expect(
    clippy::cognitive_complexity,
    reason = "complexity from dynamic_span! macro expansion"
)]
pub(crate) fn send_span(config: &TracingConfig, api_key: ApiKey, body_bytes: usize) -> Span {
    dynamic_span!(
        config.send_level,
        "broker.send",
        api_key = api_key.0,
        body.bytes = body_bytes,
        correlation_id = tracing::field::Empty
    )
}

/// Span for a request and its response; `result` is recorded on completion.
#[expect(
    clippy::cognitive_complexity,
    reason = "complexity from dynamic_span! macro expansion"
)]
pub(crate) fn call_span(config: &TracingConfig, api_key: ApiKey) -> Span {
    dynamic_span!(
        config.call_level,
        "broker.call",
        api_key = api_key.0,
        result = tracing::field::Empty
    )
}

#[expect(
    clippy::cognitive_complexity,
    reason = "complexity from dynamic_span! macro expansion"
)]
pub(crate) fn close_span(config: &TracingConfig, host: &str, port: i32) -> Span {
    dynamic_span!(
        config.close_level,
        "broker.close",
        broker.host = host,
        broker.port = port
    )
}

/// Run `operation` inside `span`, then record its outcome in the span.
///
/// When `timing` is set, an `elapsed_us` event is emitted inside the span
/// once the operation completes. Spans without a `result` field ignore the
/// outcome.
pub(crate) async fn instrumented<T, F>(span: Span, timing: bool, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let start = timing.then(Instant::now);
    let result = operation.instrument(span.clone()).await;
    let _entered = span.enter();
    span.record("result", if result.is_ok() { "ok" } else { "err" });
    emit_timing_event(start);
    result
}

/// Emit an `elapsed_us` event when timing was enabled for the operation.
fn emit_timing_event(start: Option<Instant>) {
    if let Some(start) = start {
        let elapsed_us = start.elapsed().as_micros();
        tracing::debug!(elapsed_us = elapsed_us, "operation.timing");
    }
}
