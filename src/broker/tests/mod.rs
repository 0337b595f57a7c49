//! Unit tests for the broker handle.

mod tracing;
