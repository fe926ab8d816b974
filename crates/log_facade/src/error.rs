//! Errors reported by the facade.

use std::fmt;

/// A boxed error returned by provider factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The log method parameter that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parameter {
    /// The source identity the record is attributed to.
    Source,

    /// The name of the operation being executed.
    Operation,

    /// The message text.
    Message,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Source => "source",
            Self::Operation => "operation",
            Self::Message => "message",
        };
        f.write_str(repr)
    }
}

/// The validation rule that was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// The value was empty.
    Empty,

    /// The value exceeded its maximum length, counted in characters.
    TooLong {
        /// Maximum number of characters allowed.
        max: usize,

        /// Number of characters supplied.
        actual: usize,
    },
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("must not be empty"),
            Self::TooLong { max, actual } => {
                write!(f, "must be at most {max} characters long (got {actual})")
            }
        }
    }
}

/// A caller-supplied parameter of a log method violated its constraints.
///
/// Nothing is emitted for a call that fails validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid log parameter `{parameter}`: {rule}")]
pub struct ValidationError {
    /// The offending parameter.
    pub parameter: Parameter,

    /// The rule it violated.
    pub rule: Rule,
}

/// The configured provider could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ProviderLoadError {
    /// No factory is registered under the configured name.
    #[error("Unable to locate a log provider named `{name}`")]
    Unresolved {
        /// The configured provider name.
        name: String,
    },

    /// The registered factory failed to construct the provider.
    #[error("Unable to instantiate the log provider named `{name}`")]
    Instantiation {
        /// The configured provider name.
        name: String,

        /// The error returned by the factory.
        #[source]
        source: BoxError,
    },
}

impl ProviderLoadError {
    /// The provider name that failed to load.
    pub fn name(&self) -> &str {
        match self {
            Self::Unresolved { name } | Self::Instantiation { name, .. } => name,
        }
    }
}

/// Errors in facade configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A level name was not recognized.
    #[error("Unknown log level `{0}`")]
    UnknownLevel(String),

    /// A level directive was malformed.
    #[error("Invalid level directive `{0}`")]
    InvalidDirective(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_parameter_and_rule() {
        let error = ValidationError {
            parameter: Parameter::Operation,
            rule: Rule::TooLong { max: 64, actual: 65 },
        };
        assert_eq!(
            error.to_string(),
            "Invalid log parameter `operation`: must be at most 64 characters long (got 65)"
        );

        let error = ValidationError {
            parameter: Parameter::Source,
            rule: Rule::Empty,
        };
        assert_eq!(
            error.to_string(),
            "Invalid log parameter `source`: must not be empty"
        );
    }

    #[test]
    fn provider_load_error_carries_name_and_cause() {
        use std::error::Error as _;

        let error = ProviderLoadError::Instantiation {
            name: "custom".to_string(),
            source: "factory exploded".into(),
        };
        assert_eq!(error.name(), "custom");
        assert!(error.to_string().contains("custom"));
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("factory exploded")
        );

        let error = ProviderLoadError::Unresolved {
            name: "missing".to_string(),
        };
        assert_eq!(error.name(), "missing");
        assert!(error.source().is_none());
    }
}
