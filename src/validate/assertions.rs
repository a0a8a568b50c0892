use regex::Regex;
use serde_json::{Value, json};

use crate::error::{ValidationError, ValidationKind};

use super::{JsonType, lookup_path, present_path};

/// Fails unless `status` is one of `expected`.
///
/// # Errors
///
/// Returns a [`ValidationKind::Status`] error carrying both sides.
pub fn status_in(status: u16, expected: &[u16]) -> Result<(), ValidationError> {
    if expected.contains(&status) {
        return Ok(());
    }
    Err(ValidationError::new(
        ValidationKind::Status,
        "status",
        format!("Expected status in {:?}, got {}", expected, status),
        json!({ "expected": expected, "actual": status }),
    ))
}

/// Fails when any of `fields` is missing or null.
///
/// The error names the first missing field; `details.missing` lists all of
/// them and `details.input` holds the checked value.
///
/// # Errors
///
/// Returns a [`ValidationKind::Required`] error.
pub fn required_fields(value: &Value, fields: &[&str]) -> Result<(), ValidationError> {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| present_path(value, field).is_none())
        .collect();
    let Some(first) = missing.first() else {
        return Ok(());
    };
    Err(ValidationError::new(
        ValidationKind::Required,
        *first,
        format!("Missing required field(s): {}", missing.join(", ")),
        json!({ "missing": missing, "input": value }),
    ))
}

/// Fails unless the value at `field` has type `expected`.
///
/// # Errors
///
/// Returns a [`ValidationKind::Type`] error; a missing field reports
/// `"missing"` as its actual type.
pub fn field_type(value: &Value, field: &str, expected: JsonType) -> Result<(), ValidationError> {
    let actual = lookup_path(value, field);
    if actual.is_some_and(|found| expected.matches(found)) {
        return Ok(());
    }
    let actual_name = actual.map_or("missing", |found| JsonType::of(found).as_str());
    Err(ValidationError::new(
        ValidationKind::Type,
        field,
        format!("Expected {} to be {}, got {}", field, expected, actual_name),
        json!({ "expected": expected.as_str(), "actual": actual_name }),
    ))
}

/// Fails unless the value at `field` is an array with at least one element.
///
/// # Errors
///
/// Returns a [`ValidationKind::NonEmpty`] error.
pub fn non_empty_array(value: &Value, field: &str) -> Result<(), ValidationError> {
    match lookup_path(value, field) {
        Some(Value::Array(items)) if !items.is_empty() => Ok(()),
        Some(Value::Array(_)) => Err(ValidationError::new(
            ValidationKind::NonEmpty,
            field,
            format!("Expected {} to be a non-empty array", display_field(field)),
            json!({ "expected": "non-empty array", "actual": [] }),
        )),
        other => Err(ValidationError::new(
            ValidationKind::NonEmpty,
            field,
            format!("Expected {} to be an array", display_field(field)),
            json!({
                "expected": "non-empty array",
                "actual": other.map_or("missing", |found| JsonType::of(found).as_str()),
            }),
        )),
    }
}

/// Fails unless the value at `field` is a number within `[min, max]`.
///
/// # Errors
///
/// Returns a [`ValidationKind::Range`] error.
pub fn number_in_range(
    value: &Value,
    field: &str,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    let found = lookup_path(value, field);
    match found.and_then(Value::as_f64) {
        Some(number) if number >= min && number <= max => Ok(()),
        Some(number) => Err(ValidationError::new(
            ValidationKind::Range,
            field,
            format!(
                "Expected {} within [{}, {}], got {}",
                display_field(field),
                min,
                max,
                number
            ),
            json!({ "min": min, "max": max, "actual": found }),
        )),
        None => Err(ValidationError::new(
            ValidationKind::Range,
            field,
            format!("Expected {} to be a number", display_field(field)),
            json!({ "min": min, "max": max, "actual": found }),
        )),
    }
}

/// Fails unless the value at `field` is a string matching `pattern`.
///
/// # Errors
///
/// Returns a [`ValidationKind::Pattern`] error, also when `pattern` itself
/// does not compile.
pub fn matches_pattern(value: &Value, field: &str, pattern: &str) -> Result<(), ValidationError> {
    let regex = Regex::new(pattern).map_err(|err| {
        ValidationError::new(
            ValidationKind::Pattern,
            field,
            format!("Invalid pattern '{}': {}", pattern, err),
            json!({ "pattern": pattern }),
        )
    })?;
    match lookup_path(value, field) {
        Some(Value::String(text)) if regex.is_match(text) => Ok(()),
        other => Err(ValidationError::new(
            ValidationKind::Pattern,
            field,
            format!("Expected {} to match /{}/", display_field(field), pattern),
            json!({ "pattern": pattern, "actual": other }),
        )),
    }
}

/// Fails unless the value at `field` is a string equal to one of `allowed`.
///
/// # Errors
///
/// Returns a [`ValidationKind::Enum`] error.
pub fn one_of(value: &Value, field: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    let found = lookup_path(value, field);
    if found
        .and_then(Value::as_str)
        .is_some_and(|text| allowed.contains(&text))
    {
        return Ok(());
    }
    Err(ValidationError::new(
        ValidationKind::Enum,
        field,
        format!(
            "Expected {} to be one of [{}]",
            display_field(field),
            allowed.join(", ")
        ),
        json!({ "allowed": allowed, "actual": found }),
    ))
}

/// Turns a boolean expectation into a validation result.
///
/// # Errors
///
/// Returns a [`ValidationKind::Expectation`] error when `condition` is false.
pub fn ensure(
    condition: bool,
    field: &str,
    message: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::expectation(field, message()))
    }
}

fn display_field(field: &str) -> &str {
    if field.is_empty() { "value" } else { field }
}
