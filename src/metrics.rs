//! Metric helpers for `brokerlink`.
//!
//! This module defines metric names and helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::{counter, gauge};

use crate::protocol::ApiKey;

/// Name of the gauge tracking connected broker handles.
pub const BROKERS_CONNECTED: &str = "brokerlink_brokers_connected";
/// Name of the counter tracking requests written to a broker.
pub const REQUESTS_SENT: &str = "brokerlink_requests_sent_total";
/// Name of the counter tracking responses delivered to callers.
pub const RESPONSES_RECEIVED: &str = "brokerlink_responses_received_total";
/// Name of the counter tracking failures delivered to callers.
pub const ERRORS_TOTAL: &str = "brokerlink_errors_total";

/// Increment the connected brokers gauge.
pub fn inc_connections() {
    #[cfg(feature = "metrics")]
    gauge!(BROKERS_CONNECTED).increment(1.0);
}

/// Decrement the connected brokers gauge.
pub fn dec_connections() {
    #[cfg(feature = "metrics")]
    gauge!(BROKERS_CONNECTED).decrement(1.0);
}

/// Record a request written for the given API key.
pub fn inc_requests(api_key: ApiKey) {
    #[cfg(feature = "metrics")]
    counter!(REQUESTS_SENT, "api_key" => api_key.to_string()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = api_key;
}

/// Record a response body delivered to its caller.
pub fn inc_responses() {
    #[cfg(feature = "metrics")]
    counter!(RESPONSES_RECEIVED).increment(1);
}

/// Record a failure of the given kind.
pub fn inc_errors(kind: &'static str) {
    #[cfg(feature = "metrics")]
    counter!(ERRORS_TOTAL, "kind" => kind).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = kind;
}
