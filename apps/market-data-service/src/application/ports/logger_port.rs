//! Structured Logger Port (Driven Port)
//!
//! Each call emits exactly one self-contained record carrying severity,
//! message, timestamp and the supplied fields.

/// Per-call fields attached to a log record.
///
/// `symbol` is always present; the rest are emitted only when set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogFields<'a> {
    /// Requested symbol.
    pub symbol: &'a str,
    /// Latest price.
    pub price: Option<f64>,
    /// Latest volume.
    pub volume: Option<u64>,
    /// Fetch duration in seconds.
    pub duration_secs: Option<f64>,
    /// Requested history window.
    pub days: Option<i64>,
    /// Number of history records returned.
    pub records: Option<usize>,
    /// Error message.
    pub error: Option<&'a str>,
}

impl<'a> LogFields<'a> {
    /// Fields for a symbol with nothing else set.
    #[must_use]
    pub fn symbol(symbol: &'a str) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }

    /// Set the price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the volume.
    #[must_use]
    pub const fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Set the duration.
    #[must_use]
    pub const fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    /// Set the history window.
    #[must_use]
    pub const fn with_days(mut self, days: i64) -> Self {
        self.days = Some(days);
        self
    }

    /// Set the record count.
    #[must_use]
    pub const fn with_records(mut self, records: usize) -> Self {
        self.records = Some(records);
        self
    }

    /// Set the error message.
    #[must_use]
    pub const fn with_error(mut self, error: &'a str) -> Self {
        self.error = Some(error);
        self
    }
}

/// Port for emitting structured log records.
pub trait StructuredLogger: Send + Sync {
    /// Emit an info record.
    fn info(&self, message: &str, fields: &LogFields<'_>);

    /// Emit an error record.
    fn error(&self, message: &str, fields: &LogFields<'_>);
}
