//! Log records and the sinks that receive them.

use std::error::Error;
use std::sync::{Arc, Mutex};

use crate::logging::Level;

/// Shared error attached to a record.
pub type Cause = Arc<dyn Error + Send + Sync>;

/// A single log record. Never persisted; handed straight to a sink.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub tag: String,
    pub message: String,
    pub cause: Option<Cause>,
}

impl LogRecord {
    pub fn new(level: Level, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            tag: tag.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the error that triggered this record.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }
}

/// Destination for dispatched records. Failures are the sink's problem.
pub trait LogSink: Send + Sync {
    fn write(&self, record: &LogRecord);
}

/// Forwards records to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, record: &LogRecord) {
        let tag = record.tag.as_str();
        let cause = record.cause.as_ref().map(|e| e.to_string());
        let cause = cause.as_deref();
        let message = record.message.as_str();

        match record.level {
            Level::Debug => tracing::debug!(tag, cause, "{}", message),
            Level::Info => tracing::info!(tag, cause, "{}", message),
            Level::Warning => tracing::warn!(tag, cause, "{}", message),
            Level::Error => tracing::error!(tag, cause, "{}", message),
        }
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|mut records| std::mem::take(&mut *records))
            .unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &LogRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

impl<S> LogSink for Arc<S>
where
    S: LogSink + ?Sized,
{
    fn write(&self, record: &LogRecord) {
        (**self).write(record)
    }
}
