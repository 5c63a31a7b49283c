//! Validated record instances
//!
//! A record instance is created in a single atomic step: candidate values
//! are validated against the schema, and any violation fails construction
//! with the complete violation list. No partially populated instance is
//! ever observable.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::schema::{validate, RecordSchema};

use super::errors::{RecordResult, ValidationError};

/// A concrete, validated value conforming to one schema.
///
/// Immutable after creation; shares its schema read-only with any number
/// of sibling instances.
#[derive(Debug, Clone)]
pub struct RecordInstance {
    schema: Arc<RecordSchema>,
    /// Present field values, declared defaults filled in
    values: BTreeMap<String, Value>,
}

impl RecordInstance {
    /// Validates the candidate values and builds the instance.
    ///
    /// Declared defaults are filled in for absent optional fields after
    /// validation succeeds.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` carrying every violation when the values
    /// do not fully conform.
    pub fn create(schema: Arc<RecordSchema>, values: Map<String, Value>) -> RecordResult<Self> {
        let violations = validate(&schema, &values);
        if !violations.is_empty() {
            return Err(ValidationError::new(&schema.name, violations));
        }

        let mut stored: BTreeMap<String, Value> = values.into_iter().collect();
        for field in &schema.fields {
            if let Some(default) = &field.default {
                stored
                    .entry(field.name.clone())
                    .or_insert_with(|| default.clone());
            }
        }

        Ok(Self { schema, values: stored })
    }

    /// Returns the schema this record conforms to.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Returns a field value by name; absent optional fields yield `None`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Deterministic rendering as `Name{field1=value1, field2=value2, ...}`
    /// in schema field order.
    ///
    /// Absent optional fields render as `null`, text values unquoted. Used
    /// for diagnostics and golden-output comparison, not for parsing.
    pub fn canonical_form(&self) -> String {
        let mut out = String::with_capacity(64);
        out.push_str(&self.schema.name);
        out.push('{');
        for (i, field) in self.schema.fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&field.name);
            out.push('=');
            match self.values.get(&field.name) {
                Some(value) => out.push_str(&render_value(value)),
                None => out.push_str("null"),
            }
        }
        out.push('}');
        out
    }
}

/// Structural equality: same schema, and every field value equal,
/// field-by-field in schema order.
impl PartialEq for RecordInstance {
    fn eq(&self, other: &Self) -> bool {
        if self.schema != other.schema {
            return false;
        }
        self.schema
            .fields
            .iter()
            .all(|f| self.values.get(&f.name) == other.values.get(&f.name))
    }
}

impl Eq for RecordInstance {}

fn render_value(value: &Value) -> String {
    match value {
        // Text renders bare, without JSON quoting
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, FieldRule, FieldType, ViolationKind};
    use serde_json::json;

    fn record_schema() -> Arc<RecordSchema> {
        Arc::new(
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
            .unwrap(),
        )
    }

    fn as_map(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_create_and_get() {
        let record = RecordInstance::create(
            record_schema(),
            as_map(json!({ "id": 42, "last": "Smith" })),
        )
        .unwrap();

        assert_eq!(record.get("id"), Some(&json!(42)));
        assert_eq!(record.get("last"), Some(&json!("Smith")));
        assert_eq!(record.get("active"), None);
        assert_eq!(record.get("nonexistent"), None);
    }

    #[test]
    fn test_canonical_form() {
        let record = RecordInstance::create(
            record_schema(),
            as_map(json!({ "id": 42, "last": "Smith" })),
        )
        .unwrap();

        assert_eq!(
            record.canonical_form(),
            "Record{id=42, last=Smith, active=null}"
        );
    }

    #[test]
    fn test_canonical_form_idempotent() {
        let record = RecordInstance::create(
            record_schema(),
            as_map(json!({ "id": 42, "last": "Smith", "active": true })),
        )
        .unwrap();

        assert_eq!(record.canonical_form(), record.canonical_form());
    }

    #[test]
    fn test_create_fails_with_all_violations() {
        let result = RecordInstance::create(
            record_schema(),
            as_map(json!({ "id": 0, "last": "" })),
        );

        let err = result.unwrap_err();
        assert_eq!(err.schema, "Record");
        assert_eq!(err.violations.len(), 2);
        assert_eq!(err.violations[0].kind, ViolationKind::RangeViolation);
        assert_eq!(err.violations[0].field, "id");
        assert_eq!(err.violations[1].kind, ViolationKind::LengthViolation);
        assert_eq!(err.violations[1].field, "last");
    }

    #[test]
    fn test_equality_same_values() {
        let schema = record_schema();
        let a = RecordInstance::create(
            schema.clone(),
            as_map(json!({ "id": 42, "last": "Smith" })),
        )
        .unwrap();
        let b = RecordInstance::create(schema, as_map(json!({ "id": 42, "last": "Smith" })))
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.canonical_form(), b.canonical_form());
    }

    #[test]
    fn test_single_value_change_breaks_equality() {
        let schema = record_schema();
        let a = RecordInstance::create(
            schema.clone(),
            as_map(json!({ "id": 42, "last": "Smith" })),
        )
        .unwrap();
        let b = RecordInstance::create(schema, as_map(json!({ "id": 43, "last": "Smith" })))
            .unwrap();

        assert_ne!(a, b);
        assert_ne!(a.canonical_form(), b.canonical_form());
    }

    #[test]
    fn test_different_schemas_never_equal() {
        let a = RecordInstance::create(
            record_schema(),
            as_map(json!({ "id": 42, "last": "Smith" })),
        )
        .unwrap();

        let other = Arc::new(
            RecordSchema::define(
                "Other",
                vec![
                    FieldDef::required("id", FieldType::Integer),
                    FieldDef::required("last", FieldType::Text),
                ],
            )
            .unwrap(),
        );
        let b = RecordInstance::create(other, as_map(json!({ "id": 42, "last": "Smith" })))
            .unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_defaults_filled_for_absent_optional_fields() {
        let schema = Arc::new(
            RecordSchema::define(
                "Record",
                vec![
                    FieldDef::required("id", FieldType::Integer),
                    FieldDef::optional("active", FieldType::Boolean)
                        .with_default(json!(false)),
                ],
            )
            .unwrap(),
        );

        let record = RecordInstance::create(schema, as_map(json!({ "id": 1 }))).unwrap();
        assert_eq!(record.get("active"), Some(&json!(false)));
        assert_eq!(record.canonical_form(), "Record{id=1, active=false}");
    }

    #[test]
    fn test_supplied_value_wins_over_default() {
        let schema = Arc::new(
            RecordSchema::define(
                "Record",
                vec![FieldDef::optional("active", FieldType::Boolean)
                    .with_default(json!(false))],
            )
            .unwrap(),
        );

        let record =
            RecordInstance::create(schema, as_map(json!({ "active": true }))).unwrap();
        assert_eq!(record.get("active"), Some(&json!(true)));
    }
}
