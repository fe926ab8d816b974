//! The facade's level scale and its mapping onto [`tracing::Level`].

use std::{fmt, str::FromStr};

use crate::ConfigError;

/// Severity of a log record, in ascending order.
///
/// [`LogLevel::Failure`] is the most severe level the underlying `tracing` scale knows about.
/// [`LogLevel::Security`] sits exactly one rank above it and is emitted as an `ERROR` event
/// carrying a `security = true` marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogLevel {
    /// Detailed information for debugging or tracing.
    Debug,

    /// Configuration details.
    Configuration,

    /// Standard informational messages.
    Message,

    /// Potential problems.
    Warning,

    /// Failures that prevent an operation from completing.
    Failure,

    /// Security relevant events.
    Security,
}

impl LogLevel {
    /// All levels, least severe first.
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Configuration,
        Self::Message,
        Self::Warning,
        Self::Failure,
        Self::Security,
    ];

    /// The numeric rank of the level. Higher is more severe.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Debug => 1,
            Self::Configuration => 2,
            Self::Message => 3,
            Self::Warning => 4,
            Self::Failure => 5,
            Self::Security => Self::Failure.rank() + 1,
        }
    }

    /// The upper-case name of the level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Configuration => "CONFIGURATION",
            Self::Message => "MESSAGE",
            Self::Warning => "WARNING",
            Self::Failure => "FAILURE",
            Self::Security => "SECURITY",
        }
    }

    /// The `tracing` level records of this level are emitted at.
    pub const fn as_tracing_level(self) -> tracing::Level {
        match self {
            Self::Debug | Self::Configuration => tracing::Level::DEBUG,
            Self::Message => tracing::Level::INFO,
            Self::Warning => tracing::Level::WARN,
            Self::Failure | Self::Security => tracing::Level::ERROR,
        }
    }

    /// Whether this level is the custom security level layered above the `tracing` scale.
    pub const fn is_security(self) -> bool {
        matches!(self, Self::Security)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(Self::Debug),
            "configuration" | "config" => Ok(Self::Configuration),
            "message" | "info" => Ok(Self::Message),
            "warning" | "warn" => Ok(Self::Warning),
            "failure" | "error" => Ok(Self::Failure),
            "security" => Ok(Self::Security),
            _ => Err(ConfigError::UnknownLevel(s.to_string())),
        }
    }
}
