//! Market Data Service
//!
//! The instrumented request pipeline behind the price endpoints. Every call
//! opens one span, bumps the request counter before the provider is asked,
//! and ends in exactly one [`RequestOutcome`] after logging and tracing the
//! result. Only the latest-price path feeds the price gauge and the scrape
//! duration histogram.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use tracing::Instrument;

use super::request::{RequestContext, RequestOutcome};
use crate::application::ports::{
    DataProviderPort, Endpoint, LogFields, MetricsPort, ProviderBar, ProviderError, SpanFactory,
    StructuredLogger,
};
use crate::domain::market_data::{OhlcvRecord, PriceHistory, PriceSnapshot, Symbol};

/// Span name for latest-price requests.
pub const GET_MARKET_DATA: &str = "get_market_data";

/// Span name for history requests.
pub const GET_HISTORICAL_DATA: &str = "get_historical_data";

/// Serves latest prices and daily history with spans, metrics and logs.
pub struct MarketDataService {
    provider: Arc<dyn DataProviderPort>,
    metrics: Arc<dyn MetricsPort>,
    spans: Arc<dyn SpanFactory>,
    logger: Arc<dyn StructuredLogger>,
}

impl MarketDataService {
    /// Create a new service.
    pub fn new(
        provider: Arc<dyn DataProviderPort>,
        metrics: Arc<dyn MetricsPort>,
        spans: Arc<dyn SpanFactory>,
        logger: Arc<dyn StructuredLogger>,
    ) -> Self {
        Self {
            provider,
            metrics,
            spans,
            logger,
        }
    }

    /// Fetch the latest price and volume for a symbol.
    pub async fn get_current_price(&self, symbol: &str) -> RequestOutcome<PriceSnapshot> {
        let mut ctx = RequestContext::start(self.spans.as_ref(), GET_MARKET_DATA, symbol);
        self.metrics
            .increment_request_count(symbol, Endpoint::MarketData);
        ctx.start_timer();

        let result = self
            .provider
            .fetch_latest(symbol)
            .instrument(ctx.tracing_span())
            .await;

        let outcome = ctx.in_scope(|ctx| match result {
            Ok(quote) => {
                let duration = ctx.elapsed();
                let price = quote.price.to_f64().unwrap_or_default();
                self.metrics.set_price(symbol, price);
                self.metrics.observe_scrape_duration(symbol, duration);
                self.logger.info(
                    &format!("Market data retrieved for {symbol}"),
                    &LogFields::symbol(symbol)
                        .with_price(price)
                        .with_volume(quote.volume)
                        .with_duration(duration.as_secs_f64()),
                );
                RequestOutcome::Success(PriceSnapshot {
                    symbol: Symbol::new(symbol),
                    price: quote.price,
                    volume: quote.volume,
                    timestamp: Utc::now(),
                })
            }
            Err(ProviderError::NotFound { .. }) => {
                let message = format!("No data found for symbol {symbol}");
                self.logger.error(&message, &LogFields::symbol(symbol));
                RequestOutcome::NotFound(message)
            }
            Err(err) => {
                let detail = err.to_string();
                self.logger.error(
                    &format!("Error fetching market data for {symbol}"),
                    &LogFields::symbol(symbol).with_error(&detail),
                );
                ctx.record_exception(&err);
                RequestOutcome::Internal(detail)
            }
        });

        ctx.finish();
        outcome
    }

    /// Fetch `days` days of daily history for a symbol, oldest first.
    pub async fn get_history(&self, symbol: &str, days: i64) -> RequestOutcome<PriceHistory> {
        let mut ctx = RequestContext::start(self.spans.as_ref(), GET_HISTORICAL_DATA, symbol);
        ctx.set_attribute("days", days);
        self.metrics
            .increment_request_count(symbol, Endpoint::HistoricalData);

        let result = self
            .provider
            .fetch_history(symbol, days)
            .instrument(ctx.tracing_span())
            .await;

        let outcome = ctx.in_scope(|ctx| match result {
            Ok(bars) if !bars.is_empty() => {
                let records: Vec<OhlcvRecord> = bars.into_iter().map(to_record).collect();
                self.logger.info(
                    &format!("Historical data retrieved for {symbol}"),
                    &LogFields::symbol(symbol)
                        .with_days(days)
                        .with_records(records.len()),
                );
                RequestOutcome::Success(PriceHistory {
                    symbol: Symbol::new(symbol),
                    records,
                })
            }
            Ok(_) | Err(ProviderError::NotFound { .. }) => {
                let message = format!("No historical data found for symbol {symbol}");
                self.logger.error(&message, &LogFields::symbol(symbol));
                RequestOutcome::NotFound(message)
            }
            Err(err) => {
                let detail = err.to_string();
                self.logger.error(
                    &format!("Error fetching historical data for {symbol}"),
                    &LogFields::symbol(symbol)
                        .with_days(days)
                        .with_error(&detail),
                );
                ctx.record_exception(&err);
                RequestOutcome::Internal(detail)
            }
        });

        ctx.finish();
        outcome
    }
}

fn to_record(bar: ProviderBar) -> OhlcvRecord {
    OhlcvRecord {
        date: bar.timestamp.date_naive(),
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: bar.volume,
    }
}
