use serde_json::{Map, Value};

use crate::validate::JsonType;

use super::types::{FieldSpec, FieldType, SchemaReport, ShapeKind, Violation, is_deleted};

/// Checks `value` against the shape for `kind`.
///
/// A `null` field counts as absent. Every violation found is reported, not
/// just the first.
#[must_use]
pub fn check(value: &Value, kind: ShapeKind) -> SchemaReport {
    let shape = kind.shape();
    let mut violations = Vec::new();

    if let Value::Object(map) = value {
        let deleted = is_deleted(value);
        for spec in shape.fields {
            check_field(map, spec, deleted, &mut violations);
        }
        for key in map.keys() {
            if shape.field(key).is_none() {
                violations.push(Violation {
                    path: key.clone(),
                    expected: "no such field".to_owned(),
                    actual: map
                        .get(key)
                        .map_or("missing", |found| JsonType::of(found).as_str())
                        .to_owned(),
                });
            }
        }
    } else {
        violations.push(Violation {
            path: String::new(),
            expected: "object".to_owned(),
            actual: JsonType::of(value).as_str().to_owned(),
        });
    }

    SchemaReport {
        shape: shape.name,
        valid: violations.is_empty(),
        violations,
    }
}

/// Checks an item against the shape its `type` discriminator names.
#[must_use]
pub fn check_item(value: &Value) -> SchemaReport {
    check(value, ShapeKind::for_item(value))
}

fn check_field(
    map: &Map<String, Value>,
    spec: &FieldSpec,
    deleted: bool,
    violations: &mut Vec<Violation>,
) {
    let Some(found) = map.get(spec.name).filter(|found| !found.is_null()) else {
        if spec.presence.is_required(deleted) {
            violations.push(Violation {
                path: spec.name.to_owned(),
                expected: format!("required {}", spec.ty),
                actual: "missing".to_owned(),
            });
        }
        return;
    };

    if !spec.ty.json_type().matches(found) {
        violations.push(Violation {
            path: spec.name.to_owned(),
            expected: spec.ty.as_str().to_owned(),
            actual: JsonType::of(found).as_str().to_owned(),
        });
        return;
    }

    if spec.ty == FieldType::IntegerArray
        && let Value::Array(items) = found
    {
        for (index, item) in items.iter().enumerate() {
            if !JsonType::Integer.matches(item) {
                violations.push(Violation {
                    path: format!("{}.{}", spec.name, index),
                    expected: JsonType::Integer.as_str().to_owned(),
                    actual: JsonType::of(item).as_str().to_owned(),
                });
            }
        }
    }

    if !spec.allowed.is_empty()
        && !found
            .as_str()
            .is_some_and(|text| spec.allowed.contains(&text))
    {
        violations.push(Violation {
            path: spec.name.to_owned(),
            expected: format!("one of [{}]", spec.allowed.join(", ")),
            actual: found.to_string(),
        });
    }

    if let Some(minimum) = spec.minimum
        && found.as_i64().is_some_and(|number| number < minimum)
    {
        violations.push(Violation {
            path: spec.name.to_owned(),
            expected: format!(">= {}", minimum),
            actual: found.to_string(),
        });
    }
}
