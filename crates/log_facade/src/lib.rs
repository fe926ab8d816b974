//! `log_facade` provides a small leveled logging facade on top of the [`tracing`] ecosystem.
//!
//! It offers:
//! - A [`LogService`] with one method per [`LogLevel`], which validates its parameters,
//!   skips disabled levels early, applies a pluggable [`Sanitizer`] to untrusted text and
//!   forwards the record to a [`LogSink`].
//! - A [`TracingSink`] recording entries as `tracing` events, filtered per source by
//!   [`LevelDirectives`].
//! - A process-wide, name-keyed cache of [`LogProvider`]s resolved from a [`ProviderRegistry`],
//!   accessed through [`get_provider()`] and reset through [`clear()`].
//!
//! # Example
//!
//! ```
//! use log_facade::{ControlCharacterSanitizer, get_provider, log_source};
//!
//! let provider = get_provider()?;
//! let service = provider.service();
//! service.set_sanitizer(ControlCharacterSanitizer);
//!
//! service.log_warning(log_source!(), "check_disk", "disk nearing capacity")?;
//!
//! let error = std::io::Error::other("token expired");
//! service.log_security_with_cause(log_source!(), "login", "login failed", &error)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod filter;
mod level;
mod provider;
mod sanitizer;
mod service;
mod sink;
mod tracing_sink;
mod validate;

pub use self::{
    error::{BoxError, ConfigError, Parameter, ProviderLoadError, Rule, ValidationError},
    filter::{LevelDirectives, DEFAULT_LEVEL},
    level::LogLevel,
    provider::{
        clear, get_provider, get_provider_with, register_provider, LogProvider, ProviderCache,
        ProviderConfig, ProviderFactory, ProviderRegistry, TracingLogProvider,
        DEFAULT_PROVIDER_NAME, PROVIDER_ENV_KEY,
    },
    sanitizer::{ControlCharacterSanitizer, IdentitySanitizer, Sanitizer},
    service::LogService,
    sink::{LogRecord, LogSink},
    tracing_sink::{TracingSink, TracingSinkConfig, FILTER_ENV_KEY, RECORD_TARGET},
    validate::{MESSAGE_MAX_LENGTH, OPERATION_MAX_LENGTH},
};

/// The source identity of type `T`: its fully-qualified type name.
///
/// ```
/// struct Scheduler;
///
/// assert!(log_facade::source_of::<Scheduler>().ends_with("::Scheduler"));
/// ```
pub fn source_of<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

/// The source identity of the calling module: its module path.
#[macro_export]
macro_rules! log_source {
    () => {
        ::std::module_path!()
    };
}
