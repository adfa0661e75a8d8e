//! Domain Layer - Core market data types.
//!
//! Plain value types with no I/O. Everything here is created per request
//! and serialized at the HTTP boundary.

/// Price snapshots and daily OHLCV history.
pub mod market_data;
