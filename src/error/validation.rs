use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Which assertion produced a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    Status,
    Required,
    Type,
    NonEmpty,
    Range,
    Pattern,
    Enum,
    Schema,
    Expectation,
}

/// A payload that did not satisfy an assertion.
///
/// `details` holds the expected/actual pair (or the whole input) so a failing
/// check can be diagnosed from the report alone.
#[derive(Debug, Clone, Error)]
#[error("{message} (field '{field}')")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub field: String,
    pub message: String,
    pub details: Value,
}

impl ValidationError {
    pub fn new(
        kind: ValidationKind,
        field: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
            details,
        }
    }

    /// A free-form expectation failure raised by a check case.
    pub fn expectation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationKind::Expectation, field, message, Value::Null)
    }
}
