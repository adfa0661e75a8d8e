#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Market Data Service - Instrumented Price API
//!
//! An HTTP service exposing current and historical security prices. Every
//! price request runs through one instrumented pipeline: it is wrapped in a
//! trace span, counted, timed, logged with structured context and mapped to
//! a stable `{"detail": ...}` error contract, whichever upstream provider
//! supplies the numbers.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Response records
//!   - `market_data`: `Symbol`, `PriceSnapshot`, `OhlcvRecord`, `PriceHistory`
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: Data provider, trace spans, structured logger
//!   - `services`: `MarketDataService` request pipeline
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `provider`: Yahoo Finance adapter and static test provider
//!   - `metrics`: Prometheus registry with optional OTLP mirror
//!   - `telemetry`: Subscriber setup, OTLP export, span adapters
//!   - `logging`: `tracing`-backed structured logger
//!   - `http`: Axum router and server
//!   - `config`: Environment configuration
//!
//! # Data Flow
//!
//! ```text
//!                 ┌─────────────────┐     ┌──────────────┐
//! HTTP client ───►│  Axum router    │────►│ MarketData   │────► DataProvider
//!                 └─────────────────┘     │ Service      │
//!                                         └──────┬───────┘
//!                               spans / metrics / logs
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Core market data types with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::market_data::{OhlcvRecord, PriceHistory, PriceSnapshot, Symbol};

// Ports
pub use application::ports::{
    DataProviderPort, Endpoint, LatestQuote, LogFields, MetricsPort, ProviderBar, ProviderError,
    RequestSpan, SpanFactory, StructuredLogger,
};

// Request pipeline
pub use application::services::{MarketDataService, RequestContext, RequestOutcome};

// Infrastructure config
pub use infrastructure::config::{ConfigError, ServerSettings, ServiceConfig};

// HTTP surface
pub use infrastructure::http::{
    AppState, ErrorResponse, HealthResponse, HttpServer, HttpServerError, create_router,
};

// Providers
pub use infrastructure::provider::{StaticDataProvider, YahooDataProvider};

// Metrics
pub use infrastructure::metrics::{MetricsError, MetricsRegistry};

// Logging
pub use infrastructure::logging::{LogLevel, LogRecord, RecordingLogger, TracingLogger};

// Telemetry
pub use infrastructure::telemetry::{
    OtelSpanFactory, RecordingSpanFactory, SpanRecord, TelemetryConfig, TelemetryError,
    TelemetryGuard, init as init_telemetry,
};
