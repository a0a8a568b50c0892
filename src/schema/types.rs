use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ValidationError, ValidationKind};
use crate::validate::JsonType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    String,
    Boolean,
    IntegerArray,
}

impl FieldType {
    /// The assertion type a value of this field is checked against.
    #[must_use]
    pub const fn json_type(self) -> JsonType {
        match self {
            FieldType::Integer => JsonType::Integer,
            FieldType::String => JsonType::String,
            FieldType::Boolean => JsonType::Boolean,
            FieldType::IntegerArray => JsonType::Array,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::IntegerArray => "array<integer>",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Required unless the record carries `deleted: true`; deleted items
    /// keep only their id, type, time and tree links.
    RequiredUnlessDeleted,
    Optional,
}

impl Presence {
    #[must_use]
    pub const fn is_required(self, deleted: bool) -> bool {
        match self {
            Presence::Required => true,
            Presence::RequiredUnlessDeleted => !deleted,
            Presence::Optional => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub presence: Presence,
    /// Permitted string values; empty means any.
    pub allowed: &'static [&'static str],
    pub minimum: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Shape {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Names of the fields `value` must carry, given its deletion state.
    #[must_use]
    pub fn required_for(&self, value: &Value) -> Vec<&'static str> {
        let deleted = is_deleted(value);
        self.fields
            .iter()
            .filter(|spec| spec.presence.is_required(deleted))
            .map(|spec| spec.name)
            .collect()
    }
}

pub(super) fn is_deleted(value: &Value) -> bool {
    value
        .get("deleted")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Item,
    Story,
    Comment,
    Job,
    Poll,
    PollOpt,
    User,
}

impl ShapeKind {
    /// Picks the shape named by an item's `type` discriminator, falling back
    /// to the generic item shape.
    #[must_use]
    pub fn for_item(value: &Value) -> Self {
        match value.get("type").and_then(Value::as_str) {
            Some("story") => ShapeKind::Story,
            Some("comment") => ShapeKind::Comment,
            Some("job") => ShapeKind::Job,
            Some("poll") => ShapeKind::Poll,
            Some("pollopt") => ShapeKind::PollOpt,
            Some(_) | None => ShapeKind::Item,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, got {}", self.path, self.expected, self.actual)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub shape: &'static str,
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl SchemaReport {
    /// Converts a failed report into a validation error naming the first violation.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationKind::Schema`] error when the report has violations.
    pub fn into_result(self) -> Result<(), ValidationError> {
        let Some(first) = self.violations.first() else {
            return Ok(());
        };
        let summary: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        Err(ValidationError::new(
            ValidationKind::Schema,
            first.path.clone(),
            format!(
                "Record does not conform to the {} shape: {}",
                self.shape,
                summary.join("; ")
            ),
            json!({ "shape": self.shape, "violations": self.violations }),
        ))
    }
}
