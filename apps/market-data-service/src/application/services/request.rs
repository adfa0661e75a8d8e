//! Per-request state and outcome.

use std::time::{Duration, Instant};

use opentelemetry::Value;

use crate::application::ports::{ProviderError, RequestSpan, SpanFactory};

/// Result of one request through the pipeline.
///
/// "No data" is an expected outcome and kept apart from hard failures so the
/// HTTP layer can map each to its own status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome<T> {
    /// The provider returned data.
    Success(T),
    /// The provider had nothing for the request.
    NotFound(String),
    /// The provider failed; carries its error message.
    Internal(String),
}

impl<T> RequestOutcome<T> {
    /// Whether the request succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, if any.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::NotFound(_) | Self::Internal(_) => None,
        }
    }
}

/// State owned by a single request from entry until the response is built.
pub struct RequestContext {
    operation: &'static str,
    symbol: String,
    started_at: Instant,
    span: Box<dyn RequestSpan>,
}

impl RequestContext {
    /// Open the operation's span, tag it with the symbol and start the clock.
    pub fn start(spans: &dyn SpanFactory, operation: &'static str, symbol: &str) -> Self {
        let mut span = spans.start_span(operation);
        span.set_attribute("symbol", Value::from(symbol.to_string()));
        Self {
            operation,
            symbol: symbol.to_string(),
            started_at: Instant::now(),
            span,
        }
    }

    /// Operation name.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Requested symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Restart the latency clock, so that only work done from here on is
    /// measured.
    pub fn start_timer(&mut self) {
        self.started_at = Instant::now();
    }

    /// Time since the request started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Attach an attribute to the request span.
    pub fn set_attribute(&mut self, key: &'static str, value: impl Into<Value>) {
        self.span.set_attribute(key, value.into());
    }

    /// Record a provider failure on the request span.
    pub fn record_exception(&mut self, error: &ProviderError) {
        self.span.record_exception(error.kind(), error);
    }

    /// The `tracing` span for instrumenting the provider call.
    #[must_use]
    pub fn tracing_span(&self) -> tracing::Span {
        self.span.current()
    }

    /// Run `f` with the request span entered.
    pub fn in_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let span = self.span.current();
        span.in_scope(|| f(self))
    }

    /// Close the request span.
    pub fn finish(self) {
        self.span.end();
    }
}
