//! Application Layer - Use cases and port definitions.
//!
//! This layer contains the request pipeline and the port interfaces
//! it drives (data provider, spans, structured logs).

/// Port interfaces for external systems (data provider, tracing, logging).
pub mod ports;

/// Application services for the market data endpoints.
pub mod services;
