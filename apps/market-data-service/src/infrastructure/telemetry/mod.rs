//! OpenTelemetry Tracing Integration
//!
//! Configures the `tracing` subscriber and, when enabled, OpenTelemetry OTLP
//! export of traces and metrics to any OTLP-compatible collector.
//!
//! When export is disabled, spans are still created (so log records carry
//! span context) but nothing leaves the process.
//!
//! # Usage
//!
//! ```ignore
//! use market_data_service::infrastructure::telemetry;
//!
//! // Initialize at startup (returns guard that must be kept alive)
//! let guard = telemetry::init(&config.telemetry)?;
//! let metrics = match guard.meter() {
//!     Some(meter) => MetricsRegistry::with_meter(&meter)?,
//!     None => MetricsRegistry::new()?,
//! };
//! ```

mod recording;
mod spans;

pub use recording::{RecordingSpanFactory, SpanRecord};
pub use spans::OtelSpanFactory;

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Meter, MeterProvider as _};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Default service name for exported telemetry.
pub const DEFAULT_SERVICE_NAME: &str = "market-data-service";

/// Default OTLP gRPC endpoint.
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "market_data_service=info,tower_http=info,h2=warn,hyper=warn";

/// Instrumentation scope for tracers and meters.
const INSTRUMENTATION_SCOPE: &str = "market_data_service";

/// Log record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a format name; anything other than "json" is text.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Whether traces and metrics are pushed over OTLP.
    pub enabled: bool,
    /// OTLP exporter endpoint.
    pub otlp_endpoint: String,
    /// Service name for exported telemetry.
    pub service_name: String,
    /// Log record format.
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

/// Guard that shuts down OpenTelemetry when dropped.
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl TelemetryGuard {
    /// Meter for OTLP metric export, if export is enabled.
    #[must_use]
    pub fn meter(&self) -> Option<Meter> {
        self.meter_provider
            .as_ref()
            .map(|provider| provider.meter(INSTRUMENTATION_SCOPE))
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to shutdown OpenTelemetry tracer provider: {e}");
        }
        if let Some(provider) = self.meter_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to shutdown OpenTelemetry meter provider: {e}");
        }
    }
}

/// Error type for telemetry setup.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to create an OTLP exporter.
    #[error("failed to create OTLP exporter: {0}")]
    Exporter(String),
    /// Failed to parse a filter directive.
    #[error("invalid log filter directive: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    Subscriber(String),
}

/// Initialize logging, tracing and optional OTLP export.
///
/// Returns a guard that must be kept alive for the duration of the program.
///
/// # Errors
///
/// Returns `TelemetryError` if an exporter cannot be built or a global
/// subscriber is already installed.
pub fn init(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter = build_env_filter()?;

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
    };

    if !config.enabled {
        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;

        return Ok(TelemetryGuard {
            tracer_provider: None,
            meter_provider: None,
        });
    }

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", config.service_name.clone()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ])
        .build();

    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otlp_endpoint)
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();

    let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otlp_endpoint)
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let meter_provider = SdkMeterProvider::builder()
        .with_periodic_exporter(metric_exporter)
        .with_resource(resource)
        .build();

    let tracer = tracer_provider.tracer(INSTRUMENTATION_SCOPE);
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .with(otel_layer)
        .try_init()
        .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;

    tracing::info!(
        endpoint = %config.otlp_endpoint,
        service = %config.service_name,
        "OpenTelemetry export initialized"
    );

    Ok(TelemetryGuard {
        tracer_provider: Some(tracer_provider),
        meter_provider: Some(meter_provider),
    })
}

fn build_env_filter() -> Result<EnvFilter, TelemetryError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives),
        _ => EnvFilter::try_new(DEFAULT_LOG_FILTER),
    };
    filter.map_err(|e| TelemetryError::Filter(e.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
