//! A [`LogSink`] that records log entries as [`tracing`] events.

use tracing::level_filters::{LevelFilter, STATIC_MAX_LEVEL};

use crate::{ConfigError, LevelDirectives, LogLevel, LogRecord, LogSink};

/// The environment variable holding the [`LevelDirectives`] for [`TracingSinkConfig::from_env`].
pub const FILTER_ENV_KEY: &str = "LOG_FACADE_FILTER";

/// The `tracing` target every facade record is emitted under.
pub const RECORD_TARGET: &str = "log_facade";

/// Configuration for a [`TracingSink`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TracingSinkConfig {
    /// Per-source minimum levels.
    pub directives: LevelDirectives,
}

impl TracingSinkConfig {
    /// Reads the directives from the [`FILTER_ENV_KEY`] environment variable.
    ///
    /// An unset or empty variable yields the default directives.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the variable holds malformed directives.
    pub fn from_env() -> Result<Self, ConfigError> {
        let directives = match std::env::var(FILTER_ENV_KEY) {
            Ok(value) => value.parse()?,
            Err(_) => LevelDirectives::default(),
        };
        Ok(Self { directives })
    }
}

/// Records log entries as `tracing` events with the target [`RECORD_TARGET`].
///
/// A level is enabled when the configured [`LevelDirectives`] allow it for the source and the
/// current `tracing` dispatcher is interested in the mapped `tracing` level. With no subscriber
/// installed every level is disabled.
///
/// Each record becomes one event whose message is the record's message, with the fields
/// `source`, `operation`, `log_level`, `security` (only for [`LogLevel::Security`]) and `cause`
/// (the error's `Display` output, only when present).
#[derive(Clone, Debug, Default)]
pub struct TracingSink {
    directives: LevelDirectives,
}

impl TracingSink {
    /// Creates a sink with the specified configuration.
    pub fn new(config: TracingSinkConfig) -> Self {
        Self {
            directives: config.directives,
        }
    }

    /// The directives this sink filters with.
    pub fn directives(&self) -> &LevelDirectives {
        &self.directives
    }
}

macro_rules! emit_event {
    ($level:expr, $record:expr) => {
        tracing::event!(
            target: RECORD_TARGET,
            $level,
            source = $record.source,
            operation = $record.operation,
            log_level = $record.level.as_str(),
            security = $record.level.is_security().then_some(true),
            cause = $record.cause.map(tracing::field::display),
            "{}",
            $record.message
        )
    };
}

impl LogSink for TracingSink {
    fn is_enabled(&self, source: &str, level: LogLevel) -> bool {
        let native = level.as_tracing_level();
        self.directives.allows(source, level)
            && native <= STATIC_MAX_LEVEL
            && native <= LevelFilter::current()
            && tracing::dispatcher::get_default(|dispatch| {
                dispatch.max_level_hint().is_none_or(|max| native <= max)
            })
    }

    fn emit(&self, record: &LogRecord<'_>) {
        // `tracing` needs the level of each callsite to be a constant
        match record.level {
            LogLevel::Debug | LogLevel::Configuration => {
                emit_event!(tracing::Level::DEBUG, record)
            }
            LogLevel::Message => emit_event!(tracing::Level::INFO, record),
            LogLevel::Warning => emit_event!(tracing::Level::WARN, record),
            LogLevel::Failure | LogLevel::Security => emit_event!(tracing::Level::ERROR, record),
        }
    }
}
