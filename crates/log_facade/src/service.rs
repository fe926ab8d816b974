//! The leveled logging operations.

use std::{
    error::Error,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    validate::validate_call, IdentitySanitizer, LogLevel, LogRecord, LogSink, Sanitizer,
    ValidationError,
};

/// Validates, filters, sanitizes and forwards log records to a [`LogSink`].
///
/// Every log method performs the same steps:
///
/// 1. Validates the parameters. `source` must not be empty, `operation` must not be empty and
///    at most [`OPERATION_MAX_LENGTH`][crate::OPERATION_MAX_LENGTH] characters long, `message`
///    must not be empty and at most [`MESSAGE_MAX_LENGTH`][crate::MESSAGE_MAX_LENGTH] characters
///    long. Validation happens regardless of whether the level is enabled.
/// 2. Returns early if the sink reports the level as disabled for `source`. The sanitizer is not
///    invoked in this case.
/// 3. Sanitizes `operation` and `message` with the current [`Sanitizer`].
/// 4. Emits a single [`LogRecord`]. A `cause` is passed through unmodified.
///
/// ```
/// use log_facade::{LogLevel, LogRecord, LogService, LogSink};
///
/// struct WarningsOnly;
///
/// impl LogSink for WarningsOnly {
///     fn is_enabled(&self, _source: &str, level: LogLevel) -> bool {
///         level >= LogLevel::Warning
///     }
///
///     fn emit(&self, record: &LogRecord<'_>) {
///         let _ = (record.level, record.source, record.operation, record.message);
///     }
/// }
///
/// let service = LogService::new(WarningsOnly);
/// service.log_warning("app::disk", "check", "disk nearing capacity")?;
/// assert!(service.log_message("app::disk", "", "missing operation").is_err());
/// # Ok::<(), log_facade::ValidationError>(())
/// ```
pub struct LogService {
    sink: Box<dyn LogSink>,
    sanitizer: RwLock<Arc<dyn Sanitizer>>,
}

impl fmt::Debug for LogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogService").finish_non_exhaustive()
    }
}

impl LogService {
    /// Creates a service over `sink` using the [`IdentitySanitizer`].
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self::with_sanitizer(sink, IdentitySanitizer)
    }

    /// Creates a service over `sink` using the specified sanitizer.
    pub fn with_sanitizer(
        sink: impl LogSink + 'static,
        sanitizer: impl Sanitizer + 'static,
    ) -> Self {
        Self {
            sink: Box::new(sink),
            sanitizer: RwLock::new(Arc::new(sanitizer)),
        }
    }

    /// The sanitizer currently in use.
    pub fn sanitizer(&self) -> Arc<dyn Sanitizer> {
        Arc::clone(&self.sanitizer.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the sanitizer.
    ///
    /// Calls already in progress finish with the sanitizer they started with.
    pub fn set_sanitizer(&self, sanitizer: impl Sanitizer + 'static) {
        *self.sanitizer.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(sanitizer);
    }

    /// Logs a record of any level. The named log methods all delegate here.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log(
        &self,
        level: LogLevel,
        source: &str,
        operation: &str,
        message: &str,
        cause: Option<&(dyn Error + 'static)>,
    ) -> Result<(), ValidationError> {
        validate_call(source, operation, message)?;

        if !self.sink.is_enabled(source, level) {
            return Ok(());
        }

        let sanitizer = self.sanitizer();
        let operation = sanitizer.sanitize(operation);
        let message = sanitizer.sanitize(message);

        self.sink.emit(&LogRecord {
            level,
            source,
            operation: &operation,
            message: &message,
            cause,
        });

        Ok(())
    }

    /// Logs information for debugging or tracing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_debug(
        &self,
        source: &str,
        operation: &str,
        message: &str,
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Debug, source, operation, message, None)
    }

    /// Logs configuration details.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_configuration(
        &self,
        source: &str,
        operation: &str,
        message: &str,
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Configuration, source, operation, message, None)
    }

    /// Logs a standard message.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_message(
        &self,
        source: &str,
        operation: &str,
        message: &str,
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Message, source, operation, message, None)
    }

    /// Logs a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_warning(
        &self,
        source: &str,
        operation: &str,
        message: &str,
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Warning, source, operation, message, None)
    }

    /// Logs a warning along with the error that caused it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_warning_with_cause(
        &self,
        source: &str,
        operation: &str,
        message: &str,
        cause: &(dyn Error + 'static),
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Warning, source, operation, message, Some(cause))
    }

    /// Logs a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_failure(
        &self,
        source: &str,
        operation: &str,
        message: &str,
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Failure, source, operation, message, None)
    }

    /// Logs a failure along with the error that caused it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_failure_with_cause(
        &self,
        source: &str,
        operation: &str,
        message: &str,
        cause: &(dyn Error + 'static),
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Failure, source, operation, message, Some(cause))
    }

    /// Logs a security event.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_security(
        &self,
        source: &str,
        operation: &str,
        message: &str,
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Security, source, operation, message, None)
    }

    /// Logs a security event along with the error that caused it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a parameter violates its constraints.
    pub fn log_security_with_cause(
        &self,
        source: &str,
        operation: &str,
        message: &str,
        cause: &(dyn Error + 'static),
    ) -> Result<(), ValidationError> {
        self.log(LogLevel::Security, source, operation, message, Some(cause))
    }
}
