//! Port Interfaces
//!
//! Defines the interfaces (ports) for external systems following
//! the Hexagonal Architecture pattern. These are the contracts that
//! infrastructure adapters must implement.
//!
//! ## Driven Ports (Outbound)
//!
//! - `DataProviderPort`: Upstream price source
//! - `MetricsPort`: Request counter, latency histogram, price gauge
//! - `SpanFactory` / `RequestSpan`: Distributed tracing spans
//! - `StructuredLogger`: Structured log records

mod data_provider_port;
mod logger_port;
mod metrics_port;
mod span_port;

pub use data_provider_port::{DataProviderPort, LatestQuote, ProviderBar, ProviderError};
pub use logger_port::{LogFields, StructuredLogger};
pub use metrics_port::{Endpoint, MetricsPort};
pub use span_port::{RequestSpan, SpanFactory};
