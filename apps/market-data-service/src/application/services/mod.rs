//! Application Services
//!
//! Services that orchestrate domain logic and coordinate between ports.
//!
//! - `MarketDataService`: Instrumented latest-price and history requests
//! - `RequestContext`: Per-request span, symbol and start time
//! - `RequestOutcome`: Success / not found / internal failure

mod market_data_service;
mod request;

pub use market_data_service::{GET_HISTORICAL_DATA, GET_MARKET_DATA, MarketDataService};
pub use request::{RequestContext, RequestOutcome};
