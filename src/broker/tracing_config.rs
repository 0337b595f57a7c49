//! Tracing configuration for broker operations.

use tracing::Level;

/// Controls tracing span levels and per-operation timing.
///
/// By default `connect` and `close` emit spans at `INFO` level, while the
/// per-request `send` and `call` spans use `DEBUG`. Timing is off for every
/// operation. When timing is enabled, an event recording `elapsed_us` is
/// emitted as the operation completes.
///
/// # Examples
///
/// ```
/// use brokerlink::TracingConfig;
/// use tracing::Level;
///
/// let config = TracingConfig::default()
///     .with_all_levels(Level::TRACE)
///     .with_call_timing(true);
/// let _ = config;
/// ```
#[expect(
    clippy::struct_excessive_bools,
    reason = "one independent timing flag per operation"
)]
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub(crate) connect_level: Level,
    pub(crate) send_level: Level,
    pub(crate) call_level: Level,
    pub(crate) close_level: Level,
    pub(crate) connect_timing: bool,
    pub(crate) send_timing: bool,
    pub(crate) call_timing: bool,
    pub(crate) close_timing: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            connect_level: Level::INFO,
            send_level: Level::DEBUG,
            call_level: Level::DEBUG,
            close_level: Level::INFO,
            connect_timing: false,
            send_timing: false,
            call_timing: false,
            close_timing: false,
        }
    }
}

impl TracingConfig {
    /// Set the span level for `connect`.
    #[must_use]
    pub fn with_connect_level(mut self, level: Level) -> Self {
        self.connect_level = level;
        self
    }

    /// Enable or disable timing for `connect`.
    #[must_use]
    pub fn with_connect_timing(mut self, enabled: bool) -> Self {
        self.connect_timing = enabled;
        self
    }

    /// Set the span level for writing a request.
    #[must_use]
    pub fn with_send_level(mut self, level: Level) -> Self {
        self.send_level = level;
        self
    }

    /// Enable or disable timing for writing a request.
    #[must_use]
    pub fn with_send_timing(mut self, enabled: bool) -> Self {
        self.send_timing = enabled;
        self
    }

    /// Set the span level for a full request/response exchange.
    #[must_use]
    pub fn with_call_level(mut self, level: Level) -> Self {
        self.call_level = level;
        self
    }

    /// Enable or disable timing for a full request/response exchange.
    #[must_use]
    pub fn with_call_timing(mut self, enabled: bool) -> Self {
        self.call_timing = enabled;
        self
    }

    /// Set the span level for `close`.
    #[must_use]
    pub fn with_close_level(mut self, level: Level) -> Self {
        self.close_level = level;
        self
    }

    /// Enable or disable timing for `close`.
    #[must_use]
    pub fn with_close_timing(mut self, enabled: bool) -> Self {
        self.close_timing = enabled;
        self
    }

    /// Set the span level for every operation.
    #[must_use]
    pub fn with_all_levels(mut self, level: Level) -> Self {
        self.connect_level = level;
        self.send_level = level;
        self.call_level = level;
        self.close_level = level;
        self
    }

    /// Enable or disable timing for every operation.
    #[must_use]
    pub fn with_all_timing(mut self, enabled: bool) -> Self {
        self.connect_timing = enabled;
        self.send_timing = enabled;
        self.call_timing = enabled;
        self.close_timing = enabled;
        self
    }
}
