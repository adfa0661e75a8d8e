//! Market Data Types
//!
//! Core response records for current and historical prices. These are built
//! once per request and serialized at the HTTP boundary; nothing here is
//! persisted.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Symbol
// =============================================================================

/// A tradable instrument identifier (e.g. "AAPL", "BTC-USD", "shop.to").
///
/// Opaque to this service: the value is kept exactly as the caller supplied
/// it and handed to the data provider unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol without normalizing case.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// Latest Price
// =============================================================================

/// Most recent price for a symbol, as returned by `GET /market-data/{symbol}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Requested symbol.
    pub symbol: Symbol,
    /// Latest close price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Latest session volume.
    pub volume: u64,
    /// Time the response was built (not the quote's own timestamp).
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// History
// =============================================================================

/// One trading day of open/high/low/close/volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Decimal,
    /// Session high.
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    /// Session low.
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    /// Closing price.
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    /// Session volume.
    pub volume: u64,
}

/// Daily history for a symbol, as returned by `GET /historical-data/{symbol}`.
///
/// Records keep the provider's order, which is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Requested symbol.
    pub symbol: Symbol,
    /// Daily records, oldest first.
    #[serde(rename = "data")]
    pub records: Vec<OhlcvRecord>,
}
