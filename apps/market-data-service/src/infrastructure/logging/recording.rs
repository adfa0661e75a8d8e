//! Recording logger for testing.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::application::ports::{LogFields, StructuredLogger};

/// Severity of a recorded log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Informational record.
    Info,
    /// Error record.
    Error,
}

/// One captured log record with owned fields.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Severity.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
    /// Symbol field.
    pub symbol: String,
    /// Price field.
    pub price: Option<f64>,
    /// Volume field.
    pub volume: Option<u64>,
    /// Duration field.
    pub duration_secs: Option<f64>,
    /// Days field.
    pub days: Option<i64>,
    /// Record count field.
    pub records: Option<usize>,
    /// Error field.
    pub error: Option<String>,
}

impl LogRecord {
    fn new(level: LogLevel, message: &str, fields: &LogFields<'_>) -> Self {
        Self {
            level,
            message: message.to_string(),
            symbol: fields.symbol.to_string(),
            price: fields.price,
            volume: fields.volume,
            duration_secs: fields.duration_secs,
            days: fields.days,
            records: fields.records,
            error: fields.error.map(str::to_string),
        }
    }
}

/// Logger that keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingLogger {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }
}

impl StructuredLogger for RecordingLogger {
    fn info(&self, message: &str, fields: &LogFields<'_>) {
        self.records
            .lock()
            .push(LogRecord::new(LogLevel::Info, message, fields));
    }

    fn error(&self, message: &str, fields: &LogFields<'_>) {
        self.records
            .lock()
            .push(LogRecord::new(LogLevel::Error, message, fields));
    }
}
