//! Per-source level filtering, configured with directives such as `"warning,my_app::db=debug"`.

use std::{fmt, str::FromStr};

use crate::{ConfigError, LogLevel};

/// The level assigned to sources no directive matches, unless the directives override it.
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Message;

const OFF: &str = "off";

/// Minimum enabled levels keyed by source prefix.
///
/// A directive string is a comma-separated list. A bare level (or `off`) sets the default for
/// all sources; `prefix=level` sets the minimum level for sources equal to `prefix` or nested
/// below it (separated by `::` or `.`). The longest matching prefix wins.
///
/// ```
/// use log_facade::{LevelDirectives, LogLevel};
///
/// let directives: LevelDirectives = "warning,app::db=debug,app::db::pool=off".parse()?;
///
/// assert!(directives.allows("app::db::query", LogLevel::Debug));
/// assert!(!directives.allows("app::http", LogLevel::Message));
/// assert!(!directives.allows("app::db::pool", LogLevel::Security));
/// # Ok::<(), log_facade::ConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDirectives {
    default: Option<LogLevel>,
    targets: Vec<(String, Option<LogLevel>)>,
}

impl Default for LevelDirectives {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl LevelDirectives {
    /// Creates directives enabling `default` and above for every source.
    pub fn new(default: LogLevel) -> Self {
        Self {
            default: Some(default),
            targets: Vec::new(),
        }
    }

    /// Adds a directive for `prefix`. `None` disables the prefix entirely.
    #[must_use]
    pub fn with_target(mut self, prefix: impl Into<String>, level: Option<LogLevel>) -> Self {
        let prefix = prefix.into();
        self.targets.retain(|(existing, _)| *existing != prefix);
        self.targets.push((prefix, level));
        // Longest prefix first, so the first match is the most specific one
        self.targets
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self
    }

    /// The minimum enabled level for `source`, or `None` if the source is disabled.
    pub fn min_level(&self, source: &str) -> Option<LogLevel> {
        self.targets
            .iter()
            .find(|(prefix, _)| matches_prefix(source, prefix))
            .map_or(self.default, |(_, level)| *level)
    }

    /// Whether records of `level` attributed to `source` pass the directives.
    pub fn allows(&self, source: &str, level: LogLevel) -> bool {
        self.min_level(source).is_some_and(|min| level >= min)
    }
}

fn matches_prefix(source: &str, prefix: &str) -> bool {
    source
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::") || rest.starts_with('.'))
}

fn parse_level(s: &str) -> Result<Option<LogLevel>, ConfigError> {
    if s.eq_ignore_ascii_case(OFF) {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

impl FromStr for LevelDirectives {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut directives = Self::default();

        for directive in s.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((prefix, level)) => {
                    let prefix = prefix.trim();
                    if prefix.is_empty() {
                        return Err(ConfigError::InvalidDirective(directive.to_string()));
                    }
                    let level = parse_level(level.trim())
                        .map_err(|_| ConfigError::InvalidDirective(directive.to_string()))?;
                    directives = directives.with_target(prefix, level);
                }
                None => directives.default = parse_level(directive)?,
            }
        }

        Ok(directives)
    }
}

impl fmt::Display for LevelDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_name = |level: Option<LogLevel>| level.map_or(OFF, LogLevel::as_str);

        f.write_str(level_name(self.default))?;
        for (prefix, level) in &self.targets {
            write!(f, ",{prefix}={}", level_name(*level))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_message_and_above() {
        let directives = LevelDirectives::default();
        assert!(!directives.allows("app", LogLevel::Configuration));
        assert!(directives.allows("app", LogLevel::Message));
        assert!(directives.allows("app", LogLevel::Security));
    }

    #[test]
    fn longest_prefix_wins() {
        let directives: LevelDirectives = "failure,app=warning,app::db=debug".parse().unwrap();

        assert_eq!(directives.min_level("app::db::pool"), Some(LogLevel::Debug));
        assert_eq!(directives.min_level("app::http"), Some(LogLevel::Warning));
        assert_eq!(directives.min_level("app"), Some(LogLevel::Warning));
        assert_eq!(directives.min_level("other"), Some(LogLevel::Failure));
    }

    #[test]
    fn prefixes_match_on_path_boundaries_only() {
        let directives: LevelDirectives = "app=debug".parse().unwrap();

        assert_eq!(directives.min_level("app.Service"), Some(LogLevel::Debug));
        assert_eq!(directives.min_level("application"), Some(DEFAULT_LEVEL));
    }

    #[test]
    fn off_disables_every_level() {
        let directives: LevelDirectives = "off,app=security".parse().unwrap();

        assert!(!directives.allows("other", LogLevel::Security));
        assert!(directives.allows("app", LogLevel::Security));
        assert!(!directives.allows("app", LogLevel::Failure));
    }

    #[test]
    fn later_directive_for_same_prefix_replaces_earlier_one() {
        let directives: LevelDirectives = "app=debug,app=failure".parse().unwrap();
        assert_eq!(directives.min_level("app"), Some(LogLevel::Failure));
        assert_eq!(directives.to_string(), "MESSAGE,app=FAILURE");
    }

    #[test]
    fn malformed_directives_are_rejected() {
        assert!(matches!(
            "=debug".parse::<LevelDirectives>(),
            Err(ConfigError::InvalidDirective(_))
        ));
        assert!(matches!(
            "app=loud".parse::<LevelDirectives>(),
            Err(ConfigError::InvalidDirective(d)) if d == "app=loud"
        ));
        assert!(matches!(
            "loud".parse::<LevelDirectives>(),
            Err(ConfigError::UnknownLevel(_))
        ));
    }

    #[test]
    fn empty_string_yields_default() {
        assert_eq!(
            "".parse::<LevelDirectives>().unwrap(),
            LevelDirectives::default()
        );
    }
}
