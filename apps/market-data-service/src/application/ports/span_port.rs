//! Trace Span Port (Driven Port)
//!
//! Creates one span per logical operation. A span is closed when its handle
//! is ended or dropped, whichever happens first, so every exit path of the
//! wrapped operation closes it exactly once.

use opentelemetry::Value;

/// Factory for request spans.
pub trait SpanFactory: Send + Sync {
    /// Start a span named after the operation.
    fn start_span(&self, name: &'static str) -> Box<dyn RequestSpan>;
}

/// Handle to an open span.
///
/// Dropping the handle closes the span.
pub trait RequestSpan: Send {
    /// Attach an attribute to the span.
    fn set_attribute(&mut self, key: &'static str, value: Value);

    /// Record an exception event of the given kind on the span and mark it
    /// as failed.
    fn record_exception(&mut self, kind: &'static str, error: &dyn std::error::Error);

    /// The `tracing` span to enter while the operation runs, so that log
    /// records and nested spans attach to this one.
    fn current(&self) -> tracing::Span;

    /// Close the span.
    fn end(self: Box<Self>) {}
}
