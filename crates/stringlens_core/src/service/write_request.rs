//! Write payload validation.
//!
//! # Responsibility
//! - Validate the raw write payload before any analysis happens.
//!
//! # Invariants
//! - Checks run in a fixed order: field presence, then value type, then the
//!   length ceiling. The conditions stay distinct because callers map them
//!   to different outward statuses.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum accepted input length in codepoints.
pub const MAX_VALUE_CHARS: usize = 10_000;

const VALUE_FIELD: &str = "value";

/// Validation failure for a raw write payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequestError {
    /// Payload has no `value` field.
    MissingField,
    /// Payload has a `value` field that is not a string.
    InvalidType,
    /// String exceeds the input length ceiling.
    ValueTooLong { length: usize, max: usize },
}

impl Display for WriteRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField => write!(f, "missing `{VALUE_FIELD}` field"),
            Self::InvalidType => {
                write!(f, "invalid data type for `{VALUE_FIELD}`, must be a string")
            }
            Self::ValueTooLong { length, max } => {
                write!(f, "`{VALUE_FIELD}` is {length} characters, limit is {max}")
            }
        }
    }
}

impl Error for WriteRequestError {}

/// Extracts the string to analyze from a raw JSON payload.
///
/// Structural checks (presence, type) come before the semantic length check
/// so each failure mode stays individually reportable.
pub fn extract_value(payload: &serde_json::Value) -> Result<&str, WriteRequestError> {
    let field = payload
        .get(VALUE_FIELD)
        .ok_or(WriteRequestError::MissingField)?;

    let value = field.as_str().ok_or(WriteRequestError::InvalidType)?;

    let length = value.chars().count();
    if length > MAX_VALUE_CHARS {
        return Err(WriteRequestError::ValueTooLong {
            length,
            max: MAX_VALUE_CHARS,
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{extract_value, WriteRequestError, MAX_VALUE_CHARS};
    use serde_json::json;

    #[test]
    fn missing_field_is_reported_before_anything_else() {
        let err = extract_value(&json!({ "text": "hello" })).unwrap_err();
        assert_eq!(err, WriteRequestError::MissingField);
    }

    #[test]
    fn non_string_value_is_a_type_error() {
        let err = extract_value(&json!({ "value": 42 })).unwrap_err();
        assert_eq!(err, WriteRequestError::InvalidType);

        let err = extract_value(&json!({ "value": null })).unwrap_err();
        assert_eq!(err, WriteRequestError::InvalidType);
    }

    #[test]
    fn over_ceiling_value_is_rejected_with_lengths() {
        let oversized = "x".repeat(MAX_VALUE_CHARS + 1);
        let err = extract_value(&json!({ "value": oversized })).unwrap_err();
        assert_eq!(
            err,
            WriteRequestError::ValueTooLong {
                length: MAX_VALUE_CHARS + 1,
                max: MAX_VALUE_CHARS,
            }
        );
    }

    #[test]
    fn valid_payload_passes_through() {
        let payload = json!({ "value": "hello world" });
        assert_eq!(extract_value(&payload).unwrap(), "hello world");
    }
}
