//! The capability a [`LogService`][crate::LogService] delegates to.

use std::{error::Error, sync::Arc};

use crate::LogLevel;

/// A single validated, sanitized log record.
///
/// Records borrow from the log call that produced them and are never persisted by the facade.
#[derive(Clone, Copy, Debug)]
pub struct LogRecord<'a> {
    /// The level of the record.
    pub level: LogLevel,

    /// The component the record is attributed to.
    pub source: &'a str,

    /// The operation being executed, after sanitization.
    pub operation: &'a str,

    /// The message, after sanitization.
    pub message: &'a str,

    /// The error that caused the record, passed through unmodified.
    pub cause: Option<&'a (dyn Error + 'static)>,
}

/// The underlying transport that records log entries.
pub trait LogSink: Send + Sync {
    /// Whether records of `level` attributed to `source` would be recorded.
    fn is_enabled(&self, source: &str, level: LogLevel) -> bool;

    /// Records a log entry.
    fn emit(&self, record: &LogRecord<'_>);
}

impl<S> LogSink for Arc<S>
where
    S: LogSink + ?Sized,
{
    fn is_enabled(&self, source: &str, level: LogLevel) -> bool {
        (**self).is_enabled(source, level)
    }

    fn emit(&self, record: &LogRecord<'_>) {
        (**self).emit(record);
    }
}
