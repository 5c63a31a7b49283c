//! Schema type definitions
//!
//! Supported semantic types:
//! - integer: 64-bit signed integer
//! - decimal: 64-bit floating point (integral values accepted)
//! - text: UTF-8 string
//! - boolean: Boolean
//! - date: ISO-8601 calendar date (YYYY-MM-DD)

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::errors::{SchemaError, SchemaResult};

/// Supported semantic field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Decimal,
    /// UTF-8 string
    Text,
    /// Boolean
    Boolean,
    /// ISO-8601 calendar date
    Date,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Decimal => "decimal",
            FieldType::Text => "text",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }
}

/// Declarative validation rule attached to a field
///
/// Bounds are inclusive on both ends. Open ends are expressed by leaving
/// the bound out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldRule {
    /// Numeric bounds; applicable to integer and decimal fields
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// String length bounds; applicable to text fields
    Length {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
    /// Regex the whole value must match; applicable to text fields
    Pattern {
        pattern: String,
    },
}

impl FieldRule {
    /// Returns the rule kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldRule::Range { .. } => "range",
            FieldRule::Length { .. } => "length",
            FieldRule::Pattern { .. } => "pattern",
        }
    }

    /// Whether this rule kind applies to the given field type
    pub fn compatible_with(&self, field_type: FieldType) -> bool {
        match self {
            FieldRule::Range { .. } => {
                matches!(field_type, FieldType::Integer | FieldType::Decimal)
            }
            FieldRule::Length { .. } | FieldRule::Pattern { .. } => {
                field_type == FieldType::Text
            }
        }
    }
}

/// Declarative description of one schema field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, unique within a schema
    pub name: String,
    /// Semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be present at record creation
    pub required: bool,
    /// Declared default, filled in for absent optional fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Optional validation rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<FieldRule>,
}

impl FieldDef {
    /// Create a required field of the given type
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
            rule: None,
        }
    }

    /// Create an optional field of the given type
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            default: None,
            rule: None,
        }
    }

    /// Attach a validation rule
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Attach a declared default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Ordered, immutable collection of field definitions for one record type
///
/// Constructed once via [`RecordSchema::define`] and treated as read-only
/// thereafter; instances share it without locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Record type name, used as the canonical form prefix
    pub name: String,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl RecordSchema {
    /// Builds a schema, enforcing structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if a field name is duplicated, a rule kind is
    /// incompatible with its field's type, a pattern does not compile, or
    /// a default is declared on a required field, has the wrong type, or
    /// fails the field's own rule.
    pub fn define(name: impl Into<String>, fields: Vec<FieldDef>) -> SchemaResult<Self> {
        let schema = Self {
            name: name.into(),
            fields,
        };
        schema.validate_structure()?;
        Ok(schema)
    }

    /// Validates the schema structure itself (not a candidate record).
    ///
    /// Called by [`RecordSchema::define`] and again by the loader after
    /// deserializing a schema file.
    pub fn validate_structure(&self) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::duplicate_field(&self.name, &field.name));
            }
        }

        for field in &self.fields {
            if let Some(rule) = &field.rule {
                if !rule.compatible_with(field.field_type) {
                    return Err(SchemaError::incompatible_rule(
                        &self.name,
                        &field.name,
                        format!(
                            "{} rule is not applicable to {} fields",
                            rule.kind_name(),
                            field.field_type.type_name()
                        ),
                    ));
                }
                if let FieldRule::Pattern { pattern } = rule {
                    Regex::new(pattern).map_err(|e| {
                        SchemaError::bad_pattern(&self.name, &field.name, e.to_string())
                    })?;
                }
            }

            if let Some(default) = &field.default {
                // A baked-in default on a required field defeats
                // required-ness; rejected rather than replicated.
                if field.required {
                    return Err(SchemaError::bad_default(
                        &self.name,
                        &field.name,
                        "required fields must not declare a default",
                    ));
                }
                // Defaults must already conform, so record creation never
                // re-validates filled defaults.
                if let Some(problem) =
                    super::validator::field_violations(field, default).first()
                {
                    return Err(SchemaError::bad_default(
                        &self.name,
                        &field.name,
                        problem.to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Returns field names in definition order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Looks up a field definition by name
    pub fn lookup(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
