//! OpenTelemetry Span Export Tests
//!
//! Runs the span adapter under a `tracing-opentelemetry` layer backed by an
//! in-memory exporter and checks what actually gets exported.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use opentelemetry::Value;
use opentelemetry::trace::{Status, TracerProvider as _};
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider, SpanData};
use tracing_subscriber::layer::SubscriberExt;

use market_data_service::{
    MarketDataService, MetricsRegistry, OtelSpanFactory, ProviderError, RecordingLogger,
    RequestOutcome, SpanFactory, StaticDataProvider,
};

struct Export {
    exporter: InMemorySpanExporter,
    provider: SdkTracerProvider,
}

impl Export {
    fn new() -> Self {
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        Self { exporter, provider }
    }

    fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + use<> {
        tracing_subscriber::registry()
            .with(tracing_opentelemetry::layer().with_tracer(self.provider.tracer("test")))
    }

    fn finished(&self) -> Vec<SpanData> {
        self.provider.force_flush().unwrap();
        self.exporter.get_finished_spans().unwrap()
    }
}

fn has_attribute(attributes: &[opentelemetry::KeyValue], key: &str, value: &Value) -> bool {
    attributes
        .iter()
        .any(|kv| kv.key.as_str() == key && &kv.value == value)
}

#[test]
fn span_is_named_after_operation_with_attributes() {
    let export = Export::new();
    tracing::subscriber::with_default(export.subscriber(), || {
        let mut span = OtelSpanFactory::new().start_span("get_market_data");
        span.set_attribute("symbol", Value::from("ACME"));
        span.set_attribute("days", Value::from(7_i64));
        span.end();
    });

    let spans = export.finished();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].name, "get_market_data");
    assert!(has_attribute(&spans[0].attributes, "symbol", &Value::from("ACME")));
    assert!(has_attribute(&spans[0].attributes, "days", &Value::from(7_i64)));
}

#[test]
fn recorded_exception_becomes_event_and_error_status() {
    let export = Export::new();
    tracing::subscriber::with_default(export.subscriber(), || {
        let mut span = OtelSpanFactory::new().start_span("get_historical_data");
        let err = ProviderError::Transport("connection reset".to_string());
        span.record_exception(err.kind(), &err);
    });

    let spans = export.finished();
    assert_eq!(spans.len(), 1);
    let exceptions: Vec<_> = spans[0]
        .events
        .iter()
        .filter(|event| event.name == "exception")
        .collect();
    assert_eq!(exceptions.len(), 1);
    assert!(has_attribute(
        &exceptions[0].attributes,
        "exception.type",
        &Value::from("Transport")
    ));
    assert!(has_attribute(
        &exceptions[0].attributes,
        "exception.message",
        &Value::from("connection reset")
    ));
    assert!(matches!(spans[0].status, Status::Error { .. }));
}

#[test]
fn dropped_span_is_closed() {
    let export = Export::new();
    tracing::subscriber::with_default(export.subscriber(), || {
        let span = OtelSpanFactory::new().start_span("get_market_data");
        drop(span);
    });

    assert_eq!(export.finished().len(), 1);
}

#[tokio::test]
async fn failed_request_exports_one_span_with_exception() {
    let export = Export::new();
    let provider = StaticDataProvider::new();
    provider.fail_with("ACME", ProviderError::Transport("upstream timeout".to_string()));
    let service = MarketDataService::new(
        Arc::new(provider),
        Arc::new(MetricsRegistry::new().unwrap()),
        Arc::new(OtelSpanFactory::new()),
        Arc::new(RecordingLogger::new()),
    );

    let _guard = tracing::subscriber::set_default(export.subscriber());
    let outcome = service.get_current_price("ACME").await;

    assert_eq!(outcome, RequestOutcome::Internal("upstream timeout".to_string()));
    let spans = export.finished();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].name, "get_market_data");
    assert!(has_attribute(&spans[0].attributes, "symbol", &Value::from("ACME")));
    assert_eq!(
        spans[0]
            .events
            .iter()
            .filter(|event| event.name == "exception")
            .count(),
        1
    );
    assert!(matches!(spans[0].status, Status::Error { .. }));
}
