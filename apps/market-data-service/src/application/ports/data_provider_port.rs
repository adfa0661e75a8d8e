//! Data Provider Port (Driven Port)
//!
//! Interface for fetching prices from an upstream market data source.
//! The service treats the provider as a black box: it never retries, caches
//! or rate-limits calls made through this port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Most recent price reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestQuote {
    /// Latest close price.
    pub price: Decimal,
    /// Latest session volume.
    pub volume: u64,
    /// When the provider observed the price.
    pub as_of: DateTime<Utc>,
}

/// One period of history reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderBar {
    /// Period start.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: Decimal,
    /// Period high.
    pub high: Decimal,
    /// Period low.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Period volume.
    pub volume: u64,
}

/// Data provider error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no data for the symbol or period.
    #[error("no data available for {symbol}")]
    NotFound {
        /// Requested symbol.
        symbol: String,
    },

    /// The request failed in transport or the response could not be parsed.
    ///
    /// Displays as the bare upstream message so it can be surfaced verbatim.
    #[error("{0}")]
    Transport(String),
}

impl ProviderError {
    /// Stable name of the failure kind, used as the exception type on spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::Transport(_) => "Transport",
        }
    }
}

/// Port for fetching prices from an upstream provider.
///
/// This is a driven (secondary/outbound) port. The infrastructure layer
/// provides implementations (e.g., Yahoo Finance adapter).
#[async_trait]
pub trait DataProviderPort: Send + Sync {
    /// Fetch the most recent price and volume for a symbol.
    async fn fetch_latest(&self, symbol: &str) -> Result<LatestQuote, ProviderError>;

    /// Fetch daily bars covering the last `days` days, oldest first.
    ///
    /// An empty vector means the provider had no rows for the period.
    async fn fetch_history(&self, symbol: &str, days: i64)
    -> Result<Vec<ProviderBar>, ProviderError>;
}
