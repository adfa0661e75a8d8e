//! Prometheus Metrics Module
//!
//! Request, latency and price instruments for the market data endpoints.
//!
//! # Metrics
//!
//! - `market_data_request_total{symbol, endpoint}`: counter, one per request attempt
//! - `market_data_scrape_duration_seconds{symbol}`: histogram, successful latest-price fetches only
//! - `stock_price{symbol}`: gauge, last successfully fetched price
//!
//! Each [`MetricsRegistry`] owns its own recorder instead of installing a
//! global one, so independent registries (and tests) never share state.
//! When an OpenTelemetry meter is supplied, the request counter and price
//! gauge are mirrored to it for OTLP push export.
//!
//! # Integration
//!
//! Metrics are exposed at `/metrics` on the HTTP port.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Gauge, Meter};

use crate::application::ports::{Endpoint, MetricsPort};

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const REQUEST_TOTAL: &str = "market_data_request_total";
const SCRAPE_DURATION: &str = "market_data_scrape_duration_seconds";
const STOCK_PRICE: &str = "stock_price";

/// Scrape duration buckets, 5ms to 10s.
const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

// =============================================================================
// Registry
// =============================================================================

/// OpenTelemetry mirror instruments.
struct OtelInstruments {
    requests: Counter<u64>,
    price: Gauge<f64>,
}

/// Process-wide metric instruments.
///
/// Construct once at startup and share behind an `Arc`. All operations are
/// safe to call concurrently; counters and histograms never lose updates and
/// gauges are last-writer-wins.
pub struct MetricsRegistry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    otel: Option<OtelInstruments>,
}

impl MetricsRegistry {
    /// Create a registry that only serves pull-based Prometheus metrics.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` if the histogram buckets are rejected.
    pub fn new() -> Result<Self, MetricsError> {
        Self::build(None)
    }

    /// Create a registry that also mirrors instruments to an OpenTelemetry meter.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` if the histogram buckets are rejected.
    pub fn with_meter(meter: &Meter) -> Result<Self, MetricsError> {
        let otel = OtelInstruments {
            requests: meter
                .u64_counter("market_data_requests")
                .with_description("Number of market data requests")
                .with_unit("1")
                .build(),
            price: meter
                .f64_gauge(STOCK_PRICE)
                .with_description("Current stock price")
                .with_unit("USD")
                .build(),
        };
        Self::build(Some(otel))
    }

    fn build(otel: Option<OtelInstruments>) -> Result<Self, MetricsError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(Matcher::Full(SCRAPE_DURATION.to_string()), DURATION_BUCKETS)
            .map_err(|e| MetricsError::Configuration(e.to_string()))?
            .build_recorder();
        let handle = recorder.handle();

        let registry = Self {
            recorder,
            handle,
            otel,
        };
        registry.register_metrics();
        Ok(registry)
    }

    fn register_metrics(&self) {
        metrics::with_local_recorder(&self.recorder, || {
            describe_counter!(REQUEST_TOTAL, "Total market data requests");
            describe_histogram!(
                SCRAPE_DURATION,
                metrics::Unit::Seconds,
                "Time spent scraping market data"
            );
            describe_gauge!(STOCK_PRICE, "Current stock price");
        });
    }

    /// Render all instruments in the Prometheus text exposition format.
    #[must_use]
    pub fn export_text(&self) -> String {
        self.handle.render()
    }
}

impl MetricsPort for MetricsRegistry {
    fn increment_request_count(&self, symbol: &str, endpoint: Endpoint) {
        metrics::with_local_recorder(&self.recorder, || {
            counter!(
                REQUEST_TOTAL,
                "symbol" => symbol.to_string(),
                "endpoint" => endpoint.as_str()
            )
            .increment(1);
        });

        if let Some(otel) = &self.otel {
            otel.requests
                .add(1, &[KeyValue::new("symbol", symbol.to_string())]);
        }
    }

    fn observe_scrape_duration(&self, symbol: &str, duration: Duration) {
        metrics::with_local_recorder(&self.recorder, || {
            histogram!(SCRAPE_DURATION, "symbol" => symbol.to_string())
                .record(duration.as_secs_f64());
        });
    }

    fn set_price(&self, symbol: &str, price: f64) {
        metrics::with_local_recorder(&self.recorder, || {
            gauge!(STOCK_PRICE, "symbol" => symbol.to_string()).set(price);
        });

        if let Some(otel) = &self.otel {
            otel.price
                .record(price, &[KeyValue::new("symbol", symbol.to_string())]);
        }
    }
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure the Prometheus recorder.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
}

// =============================================================================
// Tests
// =============================================================================
