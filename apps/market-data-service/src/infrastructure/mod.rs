//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the concrete implementations of the port interfaces
//! defined in the application layer, plus the HTTP surface and process setup.

/// Configuration loaded from the environment.
pub mod config;

/// HTTP router and server.
pub mod http;

/// Structured request logging.
pub mod logging;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// Upstream market data providers.
pub mod provider;

/// OpenTelemetry tracing integration.
pub mod telemetry;
