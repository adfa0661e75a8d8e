//! Market Data Providers
//!
//! Implementations of [`DataProviderPort`](crate::application::ports::DataProviderPort):
//! - `YahooDataProvider`: live quotes and daily history from Yahoo Finance
//! - `StaticDataProvider`: in-memory canned responses for tests and local runs

mod mock;
mod yahoo;

pub use mock::StaticDataProvider;
pub use yahoo::YahooDataProvider;
