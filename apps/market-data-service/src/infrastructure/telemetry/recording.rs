//! Recording span factory for testing.

use std::sync::Arc;

use opentelemetry::Value;
use parking_lot::Mutex;

use crate::application::ports::{RequestSpan, SpanFactory};

/// Everything observed about one span.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanRecord {
    /// Operation name.
    pub name: String,
    /// Attributes in the order they were set.
    pub attributes: Vec<(String, Value)>,
    /// Recorded exception messages.
    pub exceptions: Vec<String>,
    /// Kind of each recorded exception, parallel to `exceptions`.
    pub exception_kinds: Vec<&'static str>,
    /// How many times the span was closed.
    pub end_count: usize,
}

impl SpanRecord {
    /// Look up an attribute by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Span factory that keeps every span it creates in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpanFactory {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
}

impl RecordingSpanFactory {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all spans started so far.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans.lock().clone()
    }
}

impl SpanFactory for RecordingSpanFactory {
    fn start_span(&self, name: &'static str) -> Box<dyn RequestSpan> {
        let mut spans = self.spans.lock();
        spans.push(SpanRecord {
            name: name.to_string(),
            ..SpanRecord::default()
        });
        Box::new(RecordingSpan {
            index: spans.len() - 1,
            spans: Arc::clone(&self.spans),
        })
    }
}

struct RecordingSpan {
    index: usize,
    spans: Arc<Mutex<Vec<SpanRecord>>>,
}

impl RecordingSpan {
    fn update(&self, f: impl FnOnce(&mut SpanRecord)) {
        if let Some(record) = self.spans.lock().get_mut(self.index) {
            f(record);
        }
    }
}

impl RequestSpan for RecordingSpan {
    fn set_attribute(&mut self, key: &'static str, value: Value) {
        self.update(|record| record.attributes.push((key.to_string(), value)));
    }

    fn record_exception(&mut self, kind: &'static str, error: &dyn std::error::Error) {
        let message = error.to_string();
        self.update(|record| {
            record.exceptions.push(message);
            record.exception_kinds.push(kind);
        });
    }

    fn current(&self) -> tracing::Span {
        tracing::Span::none()
    }
}

impl Drop for RecordingSpan {
    fn drop(&mut self) {
        self.update(|record| record.end_count += 1);
    }
}
