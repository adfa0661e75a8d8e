//! Structured Logging
//!
//! `TracingLogger` turns each call into a single `tracing` event, so the
//! configured subscriber decides the output format (text or one JSON object
//! per line) and the record inherits the active request span.

mod recording;

pub use recording::{LogLevel, LogRecord, RecordingLogger};

use crate::application::ports::{LogFields, StructuredLogger};

/// Target used for request log records.
pub const REQUEST_LOG_TARGET: &str = "market_data_service::requests";

/// Structured logger backed by `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new logger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StructuredLogger for TracingLogger {
    fn info(&self, message: &str, fields: &LogFields<'_>) {
        tracing::info!(
            target: REQUEST_LOG_TARGET,
            symbol = fields.symbol,
            price = fields.price,
            volume = fields.volume,
            duration_secs = fields.duration_secs,
            days = fields.days,
            records = fields.records,
            error = fields.error,
            "{message}"
        );
    }

    fn error(&self, message: &str, fields: &LogFields<'_>) {
        tracing::error!(
            target: REQUEST_LOG_TARGET,
            symbol = fields.symbol,
            price = fields.price,
            volume = fields.volume,
            duration_secs = fields.duration_secs,
            days = fields.days,
            records = fields.records,
            error = fields.error,
            "{message}"
        );
    }
}
