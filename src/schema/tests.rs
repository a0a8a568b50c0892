use super::*;
use crate::validate::{field_type, required_fields};
use serde_json::{Value, json};

fn story() -> Value {
    json!({
        "by": "dhouston",
        "descendants": 71,
        "id": 8863,
        "kids": [8952, 9224, 8917],
        "score": 111,
        "time": 1175714200,
        "title": "My YC app: Dropbox - Throw away your USB drive",
        "type": "story",
        "url": "http://www.getdropbox.com/u/2/screencast.html"
    })
}

fn comment() -> Value {
    json!({
        "by": "norvig",
        "id": 2921983,
        "kids": [2922097, 2922429],
        "parent": 2921506,
        "text": "Aw shucks, guys ... you make me blush with your compliments.",
        "time": 1314211127,
        "type": "comment"
    })
}

fn user() -> Value {
    json!({
        "about": "This is a test",
        "created": 1173923446,
        "id": "jl",
        "karma": 2937,
        "submitted": [8265435, 8168423]
    })
}

fn samples() -> Vec<Value> {
    vec![
        story(),
        comment(),
        json!({
            "by": "justin", "id": 192327, "score": 6, "time": 1210981217,
            "title": "Justin.tv is looking for a Lead Flash Engineer!",
            "type": "job", "url": ""
        }),
        json!({
            "by": "pg", "descendants": 54, "id": 126809, "kids": [126822],
            "parts": [126810, 126811], "score": 46, "time": 1204403652,
            "title": "Poll: What would happen if News.YC had explicit support for polls?",
            "type": "poll"
        }),
        json!({
            "by": "pg", "id": 160705, "poll": 160704, "score": 335,
            "text": "Yes, ban them; I'm tired of seeing Valleywag stories on News.YC.",
            "time": 1207886576, "type": "pollopt"
        }),
    ]
}

fn violation_paths(report: &SchemaReport) -> Vec<&str> {
    report
        .violations
        .iter()
        .map(|violation| violation.path.as_str())
        .collect()
}

#[test]
fn known_item_types_conform_to_their_shapes() -> Result<(), String> {
    for sample in samples() {
        let report = check_item(&sample);
        if !report.valid {
            return Err(format!("{} failed: {:?}", report.shape, report.violations));
        }
    }
    let report = check(&user(), ShapeKind::User);
    if !report.valid {
        return Err(format!("user failed: {:?}", report.violations));
    }
    Ok(())
}

#[test]
fn discriminator_selects_shape() -> Result<(), String> {
    let expectations = [
        ("story", ShapeKind::Story),
        ("comment", ShapeKind::Comment),
        ("job", ShapeKind::Job),
        ("poll", ShapeKind::Poll),
        ("pollopt", ShapeKind::PollOpt),
        ("launch", ShapeKind::Item),
    ];
    for (tag, kind) in expectations {
        let selected = ShapeKind::for_item(&json!({ "id": 1, "type": tag }));
        if selected != kind {
            return Err(format!("type {} selected {:?}", tag, selected));
        }
    }
    if ShapeKind::for_item(&json!({ "id": 1 })) != ShapeKind::Item {
        return Err("Missing type should select the generic item shape".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() -> Result<(), String> {
    let mut value = story();
    if let Value::Object(map) = &mut value {
        map.insert("flagged".to_owned(), json!(true));
    }
    let report = check(&value, ShapeKind::Story);
    if report.valid || violation_paths(&report) != vec!["flagged"] {
        return Err(format!("Unexpected report: {:?}", report));
    }
    Ok(())
}

#[test]
fn wrong_discriminator_is_a_violation() -> Result<(), String> {
    let report = check(&comment(), ShapeKind::Story);
    let paths = violation_paths(&report);
    if !paths.contains(&"type") {
        return Err(format!("Expected type violation: {:?}", report.violations));
    }
    if !paths.contains(&"parent") {
        return Err(format!("Expected unknown parent field: {:?}", report.violations));
    }
    Ok(())
}

#[test]
fn every_violation_is_collected() -> Result<(), String> {
    let value = json!({
        "id": -4,
        "type": "story",
        "time": "yesterday",
        "kids": [1, "two", 3]
    });
    let report = check(&value, ShapeKind::Story);
    let paths = violation_paths(&report);
    for expected in ["id", "time", "by", "title", "score", "kids.1"] {
        if !paths.contains(&expected) {
            return Err(format!("Missing violation for {}: {:?}", expected, paths));
        }
    }
    Ok(())
}

#[test]
fn deleted_items_only_need_identity_fields() -> Result<(), String> {
    let deleted = json!({
        "deleted": true,
        "id": 2921999,
        "parent": 2921506,
        "time": 1314211200,
        "type": "comment"
    });
    let report = check_item(&deleted);
    if !report.valid {
        return Err(format!("Deleted comment failed: {:?}", report.violations));
    }
    let mut live = deleted;
    if let Value::Object(map) = &mut live {
        map.remove("deleted");
    }
    let report = check_item(&live);
    if violation_paths(&report) != vec!["by", "text"] {
        return Err(format!("Unexpected violations: {:?}", report.violations));
    }
    Ok(())
}

#[test]
fn null_fields_count_as_missing() -> Result<(), String> {
    let mut value = user();
    if let Value::Object(map) = &mut value {
        map.insert("karma".to_owned(), Value::Null);
    }
    let report = check(&value, ShapeKind::User);
    if violation_paths(&report) != vec!["karma"] {
        return Err(format!("Unexpected violations: {:?}", report.violations));
    }
    Ok(())
}

#[test]
fn non_objects_fail_at_the_root() -> Result<(), String> {
    let report = check(&json!([1, 2, 3]), ShapeKind::Item);
    let Some(first) = report.violations.first() else {
        return Err("Expected a root violation".to_owned());
    };
    if !first.path.is_empty() || first.actual != "array" {
        return Err(format!("Unexpected violation: {:?}", first));
    }
    Ok(())
}

#[test]
fn failed_report_converts_to_validation_error() -> Result<(), String> {
    let report = check(&json!({ "id": "pg" }), ShapeKind::User);
    let err = match report.into_result() {
        Ok(()) => return Err("Expected schema failure".to_owned()),
        Err(err) => err,
    };
    if err.kind != crate::error::ValidationKind::Schema || err.field != "created" {
        return Err(format!("Unexpected error: {:?}", err));
    }
    if err.details["violations"].as_array().map(Vec::len) != Some(2) {
        return Err(format!("Unexpected details: {}", err.details));
    }
    check(&user(), ShapeKind::User)
        .into_result()
        .map_err(|err| err.to_string())
}

#[test]
fn conforming_records_pass_field_level_assertions() -> Result<(), String> {
    let mut records: Vec<(Value, ShapeKind)> = samples()
        .into_iter()
        .map(|value| {
            let kind = ShapeKind::for_item(&value);
            (value, kind)
        })
        .collect();
    records.push((user(), ShapeKind::User));

    for (value, kind) in records {
        if !check(&value, kind).valid {
            return Err(format!("{:?} sample does not conform", kind));
        }
        let shape = kind.shape();
        required_fields(&value, &shape.required_for(&value)).map_err(|err| err.to_string())?;
        for spec in shape.fields {
            if value.get(spec.name).is_some() {
                field_type(&value, spec.name, spec.ty.json_type())
                    .map_err(|err| err.to_string())?;
            }
        }
    }
    Ok(())
}
