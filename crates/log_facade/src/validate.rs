//! Parameter rules shared by every log method.

use crate::{Parameter, Rule, ValidationError};

/// Maximum length of an operation name, in characters.
pub const OPERATION_MAX_LENGTH: usize = 64;

/// Maximum length of a message, in characters.
pub const MESSAGE_MAX_LENGTH: usize = 256;

/// Validates the string parameters of a log call, in the order source, operation, message.
pub(crate) fn validate_call(
    source: &str,
    operation: &str,
    message: &str,
) -> Result<(), ValidationError> {
    not_empty(Parameter::Source, source)?;
    bounded(Parameter::Operation, operation, OPERATION_MAX_LENGTH)?;
    bounded(Parameter::Message, message, MESSAGE_MAX_LENGTH)
}

fn not_empty(parameter: Parameter, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError {
            parameter,
            rule: Rule::Empty,
        });
    }
    Ok(())
}

fn bounded(parameter: Parameter, value: &str, max: usize) -> Result<(), ValidationError> {
    not_empty(parameter, value)?;

    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError {
            parameter,
            rule: Rule::TooLong { max, actual },
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_at_the_limits() {
        let operation = "o".repeat(OPERATION_MAX_LENGTH);
        let message = "m".repeat(MESSAGE_MAX_LENGTH);
        assert!(validate_call("app::db", &operation, &message).is_ok());
    }

    #[test]
    fn rejects_empty_values_in_order() {
        let error = validate_call("", "", "").unwrap_err();
        assert_eq!(error.parameter, Parameter::Source);
        assert_eq!(error.rule, Rule::Empty);

        let error = validate_call("app", "", "").unwrap_err();
        assert_eq!(error.parameter, Parameter::Operation);

        let error = validate_call("app", "run", "").unwrap_err();
        assert_eq!(error.parameter, Parameter::Message);
        assert_eq!(error.rule, Rule::Empty);
    }

    #[test]
    fn rejects_values_one_past_the_limits() {
        let operation = "o".repeat(OPERATION_MAX_LENGTH + 1);
        let error = validate_call("app", &operation, "ok").unwrap_err();
        assert_eq!(
            error,
            ValidationError {
                parameter: Parameter::Operation,
                rule: Rule::TooLong { max: 64, actual: 65 },
            }
        );

        let message = "m".repeat(MESSAGE_MAX_LENGTH + 1);
        let error = validate_call("app", "run", &message).unwrap_err();
        assert_eq!(
            error.rule,
            Rule::TooLong {
                max: 256,
                actual: 257
            }
        );
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 64 two-byte characters are 128 bytes
        let operation = "é".repeat(OPERATION_MAX_LENGTH);
        assert!(validate_call("app", &operation, "ok").is_ok());
    }
}
