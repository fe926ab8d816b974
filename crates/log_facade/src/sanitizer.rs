//! Sanitizers transform untrusted operation names and messages before they reach a sink.

/// Transforms potentially untrusted text before it is logged.
///
/// Implementations must not panic for any non-empty input within the operation name and
/// message length limits.
///
/// Any `Fn(&str) -> String` closure that is `Send + Sync` is a sanitizer:
///
/// ```
/// use log_facade::Sanitizer;
///
/// let upper = |text: &str| text.to_uppercase();
/// assert_eq!(upper.sanitize("quiet"), "QUIET");
/// ```
pub trait Sanitizer: Send + Sync {
    /// Returns the sanitized form of `text`.
    fn sanitize(&self, text: &str) -> String;
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn sanitize(&self, text: &str) -> String {
        self(text)
    }
}

/// Returns its input unchanged. Used when no other sanitizer has been set.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentitySanitizer;

impl Sanitizer for IdentitySanitizer {
    fn sanitize(&self, text: &str) -> String {
        text.to_owned()
    }
}

/// Escapes control characters so a message cannot forge additional log lines.
///
/// Carriage returns, line feeds and tabs become `\r`, `\n` and `\t`; any other control
/// character becomes a `\u{..}` escape.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlCharacterSanitizer;

impl Sanitizer for ControlCharacterSanitizer {
    fn sanitize(&self, text: &str) -> String {
        let mut sanitized = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\r' => sanitized.push_str("\\r"),
                '\n' => sanitized.push_str("\\n"),
                '\t' => sanitized.push_str("\\t"),
                c if c.is_control() => sanitized.extend(c.escape_unicode()),
                c => sanitized.push(c),
            }
        }
        sanitized
    }
}
