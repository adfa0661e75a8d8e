//! Yahoo Finance data provider.
//!
//! Uses the Yahoo Finance chart API for equities, ETFs, crypto pairs
//! (e.g. BTC-USD) and FX rates (e.g. EURUSD=X).

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::application::ports::{DataProviderPort, LatestQuote, ProviderBar, ProviderError};

/// Yahoo Finance market data provider.
pub struct YahooDataProvider {
    connector: yahoo::YahooConnector,
}

impl YahooDataProvider {
    /// Create a new Yahoo Finance provider.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Transport` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ProviderError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            ProviderError::Transport(format!("failed to initialize Yahoo connector: {e}"))
        })?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl DataProviderPort for YahooDataProvider {
    async fn fetch_latest(&self, symbol: &str) -> Result<LatestQuote, ProviderError> {
        debug!(symbol, "Fetching latest quote from Yahoo");

        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| map_yahoo_error(symbol, e))?;

        let quote = response.last_quote().map_err(|e| {
            warn!(symbol, error = %e, "No quotes returned");
            map_yahoo_error(symbol, e)
        })?;

        Ok(LatestQuote {
            price: to_decimal("close", quote.close)?,
            volume: quote.volume,
            as_of: to_datetime(quote.timestamp)?,
        })
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        days: i64,
    ) -> Result<Vec<ProviderBar>, ProviderError> {
        let (start, end) = history_window(OffsetDateTime::now_utc(), days)?;

        debug!(symbol, days, "Fetching daily history from Yahoo");

        let response = self
            .connector
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| map_yahoo_error(symbol, e))?;

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::NoQuotes) => return Ok(vec![]),
            Err(e) => return Err(map_yahoo_error(symbol, e)),
        };

        quotes
            .into_iter()
            .map(|quote| {
                Ok(ProviderBar {
                    timestamp: to_datetime(quote.timestamp)?,
                    open: to_decimal("open", quote.open)?,
                    high: to_decimal("high", quote.high)?,
                    low: to_decimal("low", quote.low)?,
                    close: to_decimal("close", quote.close)?,
                    volume: quote.volume,
                })
            })
            .collect()
    }
}

/// Window of `days` ending at `end`. Spans too large for `OffsetDateTime`
/// are rejected instead of overflowing.
fn history_window(
    end: OffsetDateTime,
    days: i64,
) -> Result<(OffsetDateTime, OffsetDateTime), ProviderError> {
    days.checked_mul(86_400)
        .map(time::Duration::seconds)
        .and_then(|span| end.checked_sub(span))
        .map(|start| (start, end))
        .ok_or_else(|| ProviderError::Transport(format!("invalid history window: {days} days")))
}

fn map_yahoo_error(symbol: &str, error: yahoo::YahooError) -> ProviderError {
    if matches!(
        error,
        yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult
    ) {
        ProviderError::NotFound {
            symbol: symbol.to_string(),
        }
    } else {
        ProviderError::Transport(error.to_string())
    }
}

fn to_decimal(field: &str, value: f64) -> Result<Decimal, ProviderError> {
    Decimal::from_f64(value)
        .ok_or_else(|| ProviderError::Transport(format!("invalid {field} price: {value}")))
}

fn to_datetime<T>(timestamp: T) -> Result<DateTime<Utc>, ProviderError>
where
    T: TryInto<i64> + Copy + std::fmt::Display,
{
    timestamp
        .try_into()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .ok_or_else(|| ProviderError::Transport(format!("invalid timestamp: {timestamp}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_window_spans_requested_days() {
        let end = OffsetDateTime::from_unix_timestamp(1_767_571_200).unwrap();
        let (start, window_end) = history_window(end, 30).unwrap();
        assert_eq!(window_end, end);
        assert_eq!(end - start, time::Duration::days(30));
    }

    #[test]
    fn history_window_rejects_overflowing_day_counts() {
        let end = OffsetDateTime::now_utc();
        let err = history_window(end, i64::MAX).unwrap_err();
        assert_eq!(
            err,
            ProviderError::Transport(format!("invalid history window: {} days", i64::MAX))
        );
        let err = history_window(end, 5_000_000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid history window: 5000000 days"
        );
    }

    #[tokio::test]
    async fn fetch_history_rejects_huge_window_without_panicking() {
        let provider = YahooDataProvider::new().unwrap();
        let err = provider.fetch_history("ACME", 5_000_000).await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[test]
    fn no_quotes_maps_to_not_found() {
        let err = map_yahoo_error("ZZZZ", yahoo::YahooError::NoQuotes);
        assert_eq!(
            err,
            ProviderError::NotFound {
                symbol: "ZZZZ".to_string()
            }
        );
    }

    #[test]
    fn no_result_maps_to_not_found() {
        let err = map_yahoo_error("ZZZZ", yahoo::YahooError::NoResult);
        assert!(matches!(err, ProviderError::NotFound { .. }));
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let err = to_decimal("close", f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "invalid close price: NaN");
    }

    #[test]
    fn prices_keep_short_decimal_form() {
        assert_eq!(to_decimal("close", 150.25).unwrap(), Decimal::new(15025, 2));
        assert_eq!(to_decimal("close", 0.1).unwrap(), Decimal::new(1, 1));
    }

    #[test]
    fn timestamps_convert_from_unix_seconds() {
        let dt = to_datetime(1_767_571_200_i64).unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-05T00:00:00+00:00");
        assert!(to_datetime(u64::MAX).is_err());
    }
}
