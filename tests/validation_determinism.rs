//! Validation Determinism Tests
//!
//! Tests for validator invariants:
//! - Conforming value sets produce an empty violation list
//! - Every violation is reported, in schema field order then kind order
//! - Validation is deterministic and side-effect free

use forma::schema::{validate, FieldDef, FieldRule, FieldType, RecordSchema, ViolationKind};
use serde_json::{json, Map, Value};

// =============================================================================
// Helper Functions
// =============================================================================

/// Schema from the reference scenario: id, last, active.
fn record_schema() -> RecordSchema {
    RecordSchema::define(
        "Record",
        vec![
            FieldDef::required("id", FieldType::Integer).with_rule(FieldRule::Range {
                min: Some(1.0),
                max: Some(999_999.0),
            }),
            FieldDef::required("last", FieldType::Text).with_rule(FieldRule::Length {
                min: Some(1),
                max: Some(50),
            }),
            FieldDef::optional("active", FieldType::Boolean),
        ],
    )
    .unwrap()
}

fn as_map(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

// =============================================================================
// Conforming Inputs
// =============================================================================

/// Values satisfying every rule validate cleanly.
#[test]
fn test_conforming_values_produce_no_violations() {
    let schema = record_schema();
    let values = as_map(json!({ "id": 42, "last": "Smith", "active": true }));
    assert!(validate(&schema, &values).is_empty());
}

/// Absent optional fields are not violations.
#[test]
fn test_absent_optional_field_ok() {
    let schema = record_schema();
    let values = as_map(json!({ "id": 42, "last": "Smith" }));
    assert!(validate(&schema, &values).is_empty());
}

// =============================================================================
// Violation Reporting
// =============================================================================

/// A missing required field yields exactly one MissingRequired violation.
#[test]
fn test_missing_required_reported_exactly_once() {
    let schema = record_schema();
    let values = as_map(json!({ "last": "Smith" }));

    let violations = validate(&schema, &values);
    let missing: Vec<_> = violations
        .iter()
        .filter(|v| v.kind == ViolationKind::MissingRequired)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].field, "id");
}

/// Reference scenario: {id: 0, last: ""} reports RangeViolation(id) then
/// LengthViolation(last), in that order.
#[test]
fn test_reference_scenario_violation_order() {
    let schema = record_schema();
    let values = as_map(json!({ "id": 0, "last": "" }));

    let violations = validate(&schema, &values);
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].kind, ViolationKind::RangeViolation);
    assert_eq!(violations[0].field, "id");
    assert_eq!(violations[1].kind, ViolationKind::LengthViolation);
    assert_eq!(violations[1].field, "last");
}

/// Unknown input fields are reported after schema-field violations.
#[test]
fn test_unknown_fields_reported_last() {
    let schema = record_schema();
    let values = as_map(json!({ "id": 0, "last": "Smith", "aaa": 1, "zzz": 2 }));

    let violations = validate(&schema, &values);
    assert_eq!(violations.len(), 3);
    assert_eq!(violations[0].kind, ViolationKind::RangeViolation);
    assert_eq!(violations[1].kind, ViolationKind::UnknownField);
    assert_eq!(violations[1].field, "aaa");
    assert_eq!(violations[2].kind, ViolationKind::UnknownField);
    assert_eq!(violations[2].field, "zzz");
}

/// Every failing field is reported, not just the first.
#[test]
fn test_all_violations_reported() {
    let schema = RecordSchema::define(
        "Wide",
        vec![
            FieldDef::required("a", FieldType::Integer),
            FieldDef::required("b", FieldType::Text),
            FieldDef::required("c", FieldType::Boolean),
        ],
    )
    .unwrap();

    let violations = validate(&schema, &Map::new());
    assert_eq!(violations.len(), 3);
    assert_eq!(
        violations.iter().map(|v| v.field.as_str()).collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );
}

// =============================================================================
// Determinism
// =============================================================================

/// The same input validates identically every time.
#[test]
fn test_validation_is_deterministic() {
    let schema = record_schema();
    let values = as_map(json!({ "id": 0, "last": "", "extra": null }));

    let first = validate(&schema, &values);
    for _ in 0..100 {
        assert_eq!(validate(&schema, &values), first);
    }
}

/// Validation does not mutate the schema or the input.
#[test]
fn test_validation_has_no_side_effects() {
    let schema = record_schema();
    let values = as_map(json!({ "id": 0, "last": "" }));

    let schema_before = schema.clone();
    let values_before = values.clone();
    let _ = validate(&schema, &values);

    assert_eq!(schema, schema_before);
    assert_eq!(values, values_before);
}

// =============================================================================
// Type Semantics
// =============================================================================

/// Dates must be ISO-8601 calendar dates.
#[test]
fn test_date_semantics() {
    let schema = RecordSchema::define(
        "Employment",
        vec![FieldDef::required("hireDate", FieldType::Date)],
    )
    .unwrap();

    let ok = as_map(json!({ "hireDate": "2021-06-01" }));
    assert!(validate(&schema, &ok).is_empty());

    for bad in [json!(20210601), json!("01-06-2021"), json!("not a date")] {
        let values = as_map(json!({ "hireDate": bad }));
        let violations = validate(&schema, &values);
        assert_eq!(violations.len(), 1, "input: {}", bad);
        assert_eq!(violations[0].kind, ViolationKind::TypeMismatch);
    }
}

/// Integer fields reject decimals; decimal fields accept integral values.
#[test]
fn test_numeric_semantics() {
    let schema = RecordSchema::define(
        "Pay",
        vec![
            FieldDef::required("grade", FieldType::Integer),
            FieldDef::required("salary", FieldType::Decimal),
        ],
    )
    .unwrap();

    let values = as_map(json!({ "grade": 3, "salary": 55000 }));
    assert!(validate(&schema, &values).is_empty());

    let values = as_map(json!({ "grade": 3.5, "salary": 55000.5 }));
    let violations = validate(&schema, &values);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, "grade");
    assert_eq!(violations[0].kind, ViolationKind::TypeMismatch);
}
