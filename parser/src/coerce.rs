//! Conversion of raw option values into typed [`Value`]s.

use optspec_core::{Value, ValueType};

use crate::UsageError;

const TRUE_LITERALS: &[&str] = &["true", "yes", "y"];
const FALSE_LITERALS: &[&str] = &["false", "no", "n"];

/// Converts `raw` to the given type.
///
/// `option` is the token the user typed (e.g. `-f` or `--foo`) and only
/// appears in the error message.
///
/// # Examples
///
/// ```
/// use optspec_core::{Value, ValueType};
/// use optspec_parser::coerce;
///
/// assert_eq!(coerce(ValueType::Boolean, "--dry", "yes"), Ok(Value::Boolean(true)));
/// assert_eq!(coerce(ValueType::Number, "-n", "-2.5"), Ok(Value::Number(-2.5)));
/// assert!(coerce(ValueType::Number, "-n", "two").is_err());
/// ```
pub fn coerce(value_type: ValueType, option: &str, raw: &str) -> Result<Value, UsageError> {
    let value = match value_type {
        ValueType::String => Some(Value::String(raw.to_string())),
        ValueType::Number => parse_number(raw).map(Value::Number),
        ValueType::Boolean => parse_boolean(raw).map(Value::Boolean),
    };

    value.ok_or_else(|| UsageError::InvalidValue {
        option: option.to_string(),
        value: raw.to_string(),
        expected: value_type,
    })
}

/// Locale-free float parse; `inf` and `NaN` spellings are rejected.
fn parse_number(raw: &str) -> Option<f64> {
    let n: f64 = raw.parse().ok()?;
    n.is_finite().then_some(n)
}

fn parse_boolean(raw: &str) -> Option<bool> {
    if TRUE_LITERALS.contains(&raw) {
        Some(true)
    } else if FALSE_LITERALS.contains(&raw) {
        Some(false)
    } else {
        None
    }
}
