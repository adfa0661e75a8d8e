//! Request Metrics Port (Driven Port)
//!
//! Instruments updated by the request pipeline. Implementations must be safe
//! to call concurrently: counters and histograms never lose updates, gauges
//! are last-writer-wins.

use std::time::Duration;

/// Endpoint label for the request counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Latest price endpoint.
    MarketData,
    /// Daily history endpoint.
    HistoricalData,
}

impl Endpoint {
    /// Label value, matching the route prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarketData => "/market-data",
            Self::HistoricalData => "/historical-data",
        }
    }
}

/// Port for recording request metrics.
pub trait MetricsPort: Send + Sync {
    /// Count a request attempt for a symbol on an endpoint.
    fn increment_request_count(&self, symbol: &str, endpoint: Endpoint);

    /// Record how long a successful latest-price fetch took.
    fn observe_scrape_duration(&self, symbol: &str, duration: Duration);

    /// Set the latest price for a symbol.
    fn set_price(&self, symbol: &str, price: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_labels_match_routes() {
        assert_eq!(Endpoint::MarketData.as_str(), "/market-data");
        assert_eq!(Endpoint::HistoricalData.as_str(), "/historical-data");
    }
}
