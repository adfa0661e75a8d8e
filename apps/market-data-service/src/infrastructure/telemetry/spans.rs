//! Request spans backed by `tracing` and bridged to OpenTelemetry.
//!
//! Each span is a `tracing` span whose OpenTelemetry name is the operation
//! name. Attributes, exception events and error status go through
//! `tracing-opentelemetry`, so they are no-ops when no OpenTelemetry layer
//! is installed.

use opentelemetry::trace::Status;
use opentelemetry::{KeyValue, Value};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::application::ports::{RequestSpan, SpanFactory};

/// Span factory producing OpenTelemetry-bridged `tracing` spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtelSpanFactory;

impl OtelSpanFactory {
    /// Create a new span factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SpanFactory for OtelSpanFactory {
    fn start_span(&self, name: &'static str) -> Box<dyn RequestSpan> {
        let span = tracing::info_span!("request", otel.name = name, operation = name);
        Box::new(OtelSpan { span })
    }
}

/// Open span; closes when dropped.
struct OtelSpan {
    span: tracing::Span,
}

impl RequestSpan for OtelSpan {
    fn set_attribute(&mut self, key: &'static str, value: Value) {
        self.span.set_attribute(key, value);
    }

    fn record_exception(&mut self, kind: &'static str, error: &dyn std::error::Error) {
        let message = error.to_string();
        self.span.add_event(
            "exception",
            vec![
                KeyValue::new("exception.type", kind),
                KeyValue::new("exception.message", message.clone()),
            ],
        );
        self.span.set_status(Status::error(message));
    }

    fn current(&self) -> tracing::Span {
        self.span.clone()
    }
}
