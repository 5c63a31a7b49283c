//! Candidate-value validation against a schema
//!
//! Validation semantics:
//! - Every violation is reported, not just the first
//! - Violations come in schema field order, then kind order; unknown
//!   input fields are reported last
//! - Absent optional fields are not violations
//! - A present `null` is a type mismatch (no null values)
//! - Wrong-typed values are not additionally checked against rules
//!
//! `validate` is pure: it never mutates the schema or the input.

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};

use super::errors::Violation;
use super::types::{FieldDef, FieldRule, FieldType, RecordSchema};

/// Validates a candidate value set against a schema.
///
/// Returns the complete, deterministically ordered list of violations;
/// an empty list means the values conform.
pub fn validate(schema: &RecordSchema, values: &Map<String, Value>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for field in &schema.fields {
        match values.get(&field.name) {
            Some(value) => violations.extend(field_violations(field, value)),
            None => {
                if field.required {
                    violations.push(Violation::missing_required(&field.name));
                }
            }
        }
    }

    // Unknown fields carry no schema position; they go last, in the input
    // map's key order (sorted, since serde_json's Map is BTreeMap-backed).
    for key in values.keys() {
        if schema.lookup(key).is_none() {
            violations.push(Violation::unknown_field(key));
        }
    }

    violations
}

/// Checks one present value against its field definition.
///
/// Also used at schema definition time to vet declared defaults.
pub(crate) fn field_violations(field: &FieldDef, value: &Value) -> Vec<Violation> {
    if let Some(violation) = check_type(field, value) {
        return vec![violation];
    }
    match &field.rule {
        Some(rule) => check_rule(field, rule, value).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Type check per semantic type.
fn check_type(field: &FieldDef, value: &Value) -> Option<Violation> {
    let expected = field.field_type.type_name();
    let conforms = match field.field_type {
        FieldType::Integer => value.is_i64() || value.is_u64(),
        // Integral values are acceptable decimals
        FieldType::Decimal => value.is_number(),
        FieldType::Text => value.is_string(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Date => match value.as_str() {
            Some(s) => {
                if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
                    return None;
                }
                return Some(Violation::type_mismatch(
                    &field.name,
                    expected,
                    "malformed date string",
                ));
            }
            None => false,
        },
    };

    if conforms {
        None
    } else {
        Some(Violation::type_mismatch(
            &field.name,
            expected,
            value_type_name(value),
        ))
    }
}

/// Rule check; the value is already known to have the right type.
fn check_rule(field: &FieldDef, rule: &FieldRule, value: &Value) -> Option<Violation> {
    match rule {
        FieldRule::Range { min, max } => {
            let out_of_range = match integral_value(value) {
                // Integer values compare exactly; casting to f64 would lose
                // precision past 2^53
                Some(i) => {
                    min.is_some_and(|m| int_below(i, m)) || max.is_some_and(|m| int_above(i, m))
                }
                None => {
                    let n = value.as_f64()?;
                    min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m)
                }
            };
            if out_of_range {
                return Some(Violation::range(
                    &field.name,
                    bounds_text("value", *min, *max),
                    value.to_string(),
                ));
            }
            None
        }
        FieldRule::Length { min, max } => {
            let s = value.as_str()?;
            let len = s.chars().count();
            if min.is_some_and(|m| len < m) || max.is_some_and(|m| len > m) {
                return Some(Violation::length(
                    &field.name,
                    bounds_text("length", min.map(|m| m as f64), max.map(|m| m as f64)),
                    format!("length {}", len),
                ));
            }
            None
        }
        FieldRule::Pattern { pattern } => {
            let s = value.as_str()?;
            match Regex::new(pattern) {
                Ok(re) if re.is_match(s) => None,
                Ok(_) => Some(Violation::pattern(
                    &field.name,
                    format!("match for pattern '{}'", pattern),
                    format!("'{}'", s),
                )),
                // Schema definition already vetted the pattern
                Err(_) => None,
            }
        }
    }
}

/// Widens an integer JSON value to i128; `None` for non-integral numbers.
fn integral_value(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

/// Exact `i < bound` without routing the integer through f64.
///
/// `as` saturates, so bounds outside the i128 range still compare correctly.
fn int_below(i: i128, bound: f64) -> bool {
    let floor = bound.floor();
    if bound == floor {
        i < floor as i128
    } else {
        i <= floor as i128
    }
}

/// Exact `i > bound`, counterpart of [`int_below`].
fn int_above(i: i128, bound: f64) -> bool {
    let ceil = bound.ceil();
    if bound == ceil {
        i > ceil as i128
    } else {
        i >= ceil as i128
    }
}

/// Returns the semantic type name of a JSON value for error messages.
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "decimal"
            }
        }
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders inclusive bounds for violation messages.
fn bounds_text(subject: &str, min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{} in [{}, {}]", subject, lo, hi),
        (Some(lo), None) => format!("{} >= {}", subject, lo),
        (None, Some(hi)) => format!("{} <= {}", subject, hi),
        (None, None) => format!("any {}", subject),
    }
}
