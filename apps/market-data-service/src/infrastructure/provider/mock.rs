//! Static data provider for testing.
//!
//! Responses are configured per symbol. Symbols with nothing configured
//! behave like an unknown ticker: no latest quote and no history rows.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::application::ports::{DataProviderPort, LatestQuote, ProviderBar, ProviderError};

#[derive(Debug, Default)]
struct Inner {
    latest: HashMap<String, LatestQuote>,
    history: HashMap<String, Vec<ProviderBar>>,
    failures: HashMap<String, ProviderError>,
}

/// In-memory provider returning configured quotes, bars and failures.
#[derive(Debug, Clone, Default)]
pub struct StaticDataProvider {
    inner: Arc<RwLock<Inner>>,
    calls: Arc<AtomicUsize>,
}

impl StaticDataProvider {
    /// Create a provider with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latest quote for a symbol, stamped with the current time.
    pub fn set_latest(&self, symbol: &str, price: Decimal, volume: u64) {
        self.inner.write().latest.insert(
            symbol.to_string(),
            LatestQuote {
                price,
                volume,
                as_of: Utc::now(),
            },
        );
    }

    /// Set the daily bars returned for a symbol, in the given order.
    pub fn set_history(&self, symbol: &str, bars: Vec<ProviderBar>) {
        self.inner
            .write()
            .history
            .insert(symbol.to_string(), bars);
    }

    /// Make every call for a symbol fail with `error`.
    pub fn fail_with(&self, symbol: &str, error: ProviderError) {
        self.inner
            .write()
            .failures
            .insert(symbol.to_string(), error);
    }

    /// Number of fetches served so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Build `count` consecutive daily bars ending today, oldest first.
    ///
    /// Prices start at `base` and rise by one per day.
    #[must_use]
    pub fn daily_bars(count: u32, base: Decimal) -> Vec<ProviderBar> {
        let today = Utc::now();
        (0..count)
            .map(|i| {
                let offset = Decimal::from(i);
                let open = base + offset;
                ProviderBar {
                    timestamp: today - Duration::days(i64::from(count - 1 - i)),
                    open,
                    high: open + Decimal::ONE,
                    low: open - Decimal::ONE,
                    close: open + Decimal::new(5, 1),
                    volume: 1_000 + u64::from(i),
                }
            })
            .collect()
    }

    fn failure(&self, symbol: &str) -> Option<ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.read().failures.get(symbol).cloned()
    }
}

#[async_trait]
impl DataProviderPort for StaticDataProvider {
    async fn fetch_latest(&self, symbol: &str) -> Result<LatestQuote, ProviderError> {
        if let Some(error) = self.failure(symbol) {
            return Err(error);
        }
        self.inner
            .read()
            .latest
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                symbol: symbol.to_string(),
            })
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        _days: i64,
    ) -> Result<Vec<ProviderBar>, ProviderError> {
        if let Some(error) = self.failure(symbol) {
            return Err(error);
        }
        Ok(self
            .inner
            .read()
            .history
            .get(symbol)
            .cloned()
            .unwrap_or_default())
    }
}
