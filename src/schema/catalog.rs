//! CSV schema catalog import
//!
//! A catalog is a CSV listing every field once, with one column per record
//! model naming that model's synonym for the field:
//!
//! ```text
//! xpath, required/optional, data_type, model1, model2, model3, model4
//! ```
//!
//! Two optional columns extend a row: `validation_rules` (e.g.
//! `min:1 max:999999`, `minLength:1 maxLength:50`, `pattern:<regex>`) and
//! `default` (an explicit declared default; only legal on optional rows).
//!
//! Import derives one [`RecordSchema`] per model column. Field names come
//! from the model's synonym cell, falling back to the last xpath segment
//! when the cell is blank. Blank xpath rows are skipped.

use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldDef, FieldRule, FieldType, RecordSchema};

/// Model columns a catalog must carry, in schema emission order.
pub const MODEL_COLUMNS: [&str; 4] = ["model1", "model2", "model3", "model4"];

/// One parsed catalog row, shared by all derived schemas.
struct CatalogRow {
    /// Fallback field name, the last xpath segment
    leaf: String,
    field_type: FieldType,
    required: bool,
    rule: Option<FieldRule>,
    default: Option<Value>,
    /// Per-model field-name synonyms, blank when absent
    synonyms: Vec<String>,
}

/// Imports a catalog file, returning one schema per model column.
///
/// # Errors
///
/// Unreadable files, missing columns, unknown data types, and malformed
/// rule or default cells are FATAL catalog errors. Schema-level invariant
/// failures (e.g. a default on a required row) propagate from
/// [`RecordSchema::define`].
pub fn import_catalog(path: &Path) -> SchemaResult<Vec<RecordSchema>> {
    let file = File::open(path).map_err(|e| {
        SchemaError::malformed_catalog(path.display().to_string(), format!("Failed to open: {}", e))
    })?;

    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| catalog_error(path, 1, format!("Failed to read header: {}", e)))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let required_column = |name: &str| {
        column(name).ok_or_else(|| {
            catalog_error(path, 1, format!("Missing required column '{}'", name))
        })
    };

    let xpath_idx = required_column("xpath")?;
    let required_idx = required_column("required/optional")?;
    let type_idx = required_column("data_type")?;
    let model_idx = MODEL_COLUMNS
        .iter()
        .map(|m| required_column(m))
        .collect::<SchemaResult<Vec<usize>>>()?;
    let rules_idx = column("validation_rules");
    let default_idx = column("default");

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2; // header is line 1
        let record =
            result.map_err(|e| catalog_error(path, line, format!("Failed to parse row: {}", e)))?;

        let cell = |i: usize| record.get(i).unwrap_or("").trim();

        let xpath = cell(xpath_idx);
        if xpath.is_empty() {
            continue;
        }

        let field_type = parse_data_type(cell(type_idx))
            .ok_or_else(|| {
                catalog_error(path, line, format!("Unknown data type '{}'", cell(type_idx)))
            })?;

        let rule = match rules_idx {
            Some(i) => parse_rules(cell(i)).map_err(|reason| catalog_error(path, line, reason))?,
            None => None,
        };

        let default = match default_idx {
            Some(i) if !cell(i).is_empty() => Some(
                parse_default(cell(i), field_type)
                    .map_err(|reason| catalog_error(path, line, reason))?,
            ),
            _ => None,
        };

        rows.push(CatalogRow {
            leaf: xpath_leaf(xpath).to_string(),
            field_type,
            required: is_required(cell(required_idx)),
            rule,
            default,
            synonyms: model_idx.iter().map(|&i| cell(i).to_string()).collect(),
        });
    }

    let mut schemas = Vec::with_capacity(MODEL_COLUMNS.len());
    for (model, column_name) in MODEL_COLUMNS.iter().enumerate() {
        let fields = rows
            .iter()
            .map(|row| {
                let synonym = &row.synonyms[model];
                FieldDef {
                    name: if synonym.is_empty() {
                        row.leaf.clone()
                    } else {
                        synonym.clone()
                    },
                    field_type: row.field_type,
                    required: row.required,
                    default: row.default.clone(),
                    rule: row.rule.clone(),
                }
            })
            .collect();

        schemas.push(RecordSchema::define(capitalize(column_name), fields)?);
    }

    Ok(schemas)
}

fn catalog_error(path: &Path, line: usize, reason: String) -> SchemaError {
    SchemaError::malformed_catalog(
        path.display().to_string(),
        format!("line {}: {}", line, reason),
    )
}

/// Extracts the last xpath segment, e.g. `/root/person/name/last` -> `last`.
fn xpath_leaf(xpath: &str) -> &str {
    xpath
        .trim_matches('/')
        .rsplit('/')
        .next()
        .filter(|leaf| !leaf.is_empty())
        .unwrap_or("field")
}

/// Truthy forms accepted for the required/optional column.
fn is_required(cell: &str) -> bool {
    matches!(
        cell.to_lowercase().as_str(),
        "required" | "true" | "yes" | "1"
    )
}

/// Maps a catalog data type alias to a semantic field type.
fn parse_data_type(cell: &str) -> Option<FieldType> {
    match cell.to_lowercase().as_str() {
        "string" | "str" | "text" => Some(FieldType::Text),
        "integer" | "int" | "long" => Some(FieldType::Integer),
        "double" | "float" | "decimal" => Some(FieldType::Decimal),
        "boolean" | "bool" => Some(FieldType::Boolean),
        "date" | "datetime" | "timestamp" => Some(FieldType::Date),
        _ => None,
    }
}

/// Parses a `validation_rules` cell into a rule.
///
/// `pattern:` consumes the rest of the cell verbatim; otherwise the cell is
/// whitespace-separated `key:value` tokens, all of one rule kind.
fn parse_rules(cell: &str) -> Result<Option<FieldRule>, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }

    if let Some(pattern) = cell.strip_prefix("pattern:") {
        return Ok(Some(FieldRule::Pattern {
            pattern: pattern.trim().to_string(),
        }));
    }

    let mut min = None;
    let mut max = None;
    let mut min_length = None;
    let mut max_length = None;

    for token in cell.split_whitespace() {
        let (key, value) = token
            .split_once(':')
            .ok_or_else(|| format!("Malformed rule token '{}'", token))?;
        match key {
            "min" => {
                min = Some(parse_bound::<f64>(key, value)?);
            }
            "max" => {
                max = Some(parse_bound::<f64>(key, value)?);
            }
            "minLength" => {
                min_length = Some(parse_bound::<usize>(key, value)?);
            }
            "maxLength" => {
                max_length = Some(parse_bound::<usize>(key, value)?);
            }
            _ => return Err(format!("Unknown rule key '{}'", key)),
        }
    }

    match (
        min.is_some() || max.is_some(),
        min_length.is_some() || max_length.is_some(),
    ) {
        (true, true) => Err("Range and length bounds mixed in one rule".into()),
        (true, false) => Ok(Some(FieldRule::Range { min, max })),
        (false, true) => Ok(Some(FieldRule::Length {
            min: min_length,
            max: max_length,
        })),
        (false, false) => Ok(None),
    }
}

fn parse_bound<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("Rule bound '{}:{}' is not a number", key, value))
}

/// Parses a `default` cell into a typed value.
fn parse_default(cell: &str, field_type: FieldType) -> Result<Value, String> {
    match field_type {
        FieldType::Integer => cell
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("Default '{}' is not an integer", cell)),
        FieldType::Decimal => cell
            .parse::<f64>()
            .map(Value::from)
            .map_err(|_| format!("Default '{}' is not a decimal", cell)),
        FieldType::Boolean => match cell.to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "0" => Ok(Value::Bool(false)),
            _ => Err(format!("Default '{}' is not a boolean", cell)),
        },
        FieldType::Text | FieldType::Date => Ok(Value::String(cell.to_string())),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
xpath,required/optional,data_type,model1,model2,model3,model4,validation_rules
/root/person/id,required,Integer,personId,employeeId,customerId,memberId,min:1 max:999999
/root/person/name/last,required,String,lastName,familyName,surname,lastNm,minLength:1 maxLength:50
/root/person/email,optional,String,emailAddress,contactEmail,email,emailAddr,pattern:^[^@]+@[^@]+$
/root/person/active,optional,Boolean,active,isActive,activeFlag,enabled,
/root/person/hire_date,optional,Date,hireDate,startDate,joinDate,hiredOn,
";

    fn write_catalog(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_import_derives_four_schemas() {
        let file = write_catalog(SAMPLE);
        let schemas = import_catalog(file.path()).unwrap();
        assert_eq!(schemas.len(), 4);
        assert_eq!(schemas[0].name, "Model1");
        assert_eq!(schemas[3].name, "Model4");
        for schema in &schemas {
            assert_eq!(schema.field_count(), 5);
        }
    }

    #[test]
    fn test_models_differ_only_in_synonyms() {
        let file = write_catalog(SAMPLE);
        let schemas = import_catalog(file.path()).unwrap();
        assert_eq!(
            schemas[0].field_names().collect::<Vec<_>>(),
            vec!["personId", "lastName", "emailAddress", "active", "hireDate"]
        );
        assert_eq!(
            schemas[1].field_names().collect::<Vec<_>>(),
            vec!["employeeId", "familyName", "contactEmail", "isActive", "startDate"]
        );
        // Shape is shared across models
        let id_a = schemas[0].lookup("personId").unwrap();
        let id_b = schemas[1].lookup("employeeId").unwrap();
        assert_eq!(id_a.field_type, id_b.field_type);
        assert_eq!(id_a.required, id_b.required);
        assert_eq!(id_a.rule, id_b.rule);
    }

    #[test]
    fn test_rules_carried_over() {
        let file = write_catalog(SAMPLE);
        let schemas = import_catalog(file.path()).unwrap();
        let id = schemas[0].lookup("personId").unwrap();
        assert_eq!(
            id.rule,
            Some(FieldRule::Range {
                min: Some(1.0),
                max: Some(999_999.0),
            })
        );
        let email = schemas[0].lookup("emailAddress").unwrap();
        assert_eq!(
            email.rule,
            Some(FieldRule::Pattern {
                pattern: "^[^@]+@[^@]+$".into(),
            })
        );
    }

    #[test]
    fn test_blank_synonym_falls_back_to_xpath_leaf() {
        let content = "\
xpath,required/optional,data_type,model1,model2,model3,model4
/root/person/age,optional,Integer,,,,
";
        let file = write_catalog(content);
        let schemas = import_catalog(file.path()).unwrap();
        for schema in &schemas {
            assert!(schema.lookup("age").is_some());
        }
    }

    #[test]
    fn test_blank_xpath_rows_skipped() {
        let content = "\
xpath,required/optional,data_type,model1,model2,model3,model4
/root/person/id,required,Integer,id,id,id,id
,,,,,,
";
        let file = write_catalog(content);
        let schemas = import_catalog(file.path()).unwrap();
        assert_eq!(schemas[0].field_count(), 1);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let content = "\
xpath,required/optional,data_type,model1,model2,model3
/root/person/id,required,Integer,id,id,id
";
        let file = write_catalog(content);
        let result = import_catalog(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.is_fatal());
        assert!(err.message().contains("model4"));
    }

    #[test]
    fn test_unknown_data_type_is_fatal() {
        let content = "\
xpath,required/optional,data_type,model1,model2,model3,model4
/root/person/id,required,Widget,id,id,id,id
";
        let file = write_catalog(content);
        let result = import_catalog(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().message().contains("line 2"));
    }

    #[test]
    fn test_default_on_optional_row() {
        let content = "\
xpath,required/optional,data_type,model1,model2,model3,model4,default
/root/person/active,optional,Boolean,active,active,active,active,true
";
        let file = write_catalog(content);
        let schemas = import_catalog(file.path()).unwrap();
        assert_eq!(
            schemas[0].lookup("active").unwrap().default,
            Some(Value::Bool(true))
        );
    }

    #[test]
    fn test_default_on_required_row_rejected() {
        let content = "\
xpath,required/optional,data_type,model1,model2,model3,model4,default
/root/person/id,required,Integer,id,id,id,id,1
";
        let file = write_catalog(content);
        let result = import_catalog(file.path());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code().code(), "FORMA_SCHEMA_BAD_DEFAULT");
    }

    #[test]
    fn test_mistyped_default_is_fatal() {
        let content = "\
xpath,required/optional,data_type,model1,model2,model3,model4,default
/root/person/age,optional,Integer,age,age,age,age,forty
";
        let file = write_catalog(content);
        let result = import_catalog(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().message().contains("not an integer"));
    }

    #[test]
    fn test_mixed_rule_kinds_rejected() {
        let content = "\
xpath,required/optional,data_type,model1,model2,model3,model4,validation_rules
/root/person/id,required,Integer,id,id,id,id,min:1 maxLength:5
";
        let file = write_catalog(content);
        assert!(import_catalog(file.path()).is_err());
    }

    #[test]
    fn test_required_truthy_forms() {
        assert!(is_required("required"));
        assert!(is_required("TRUE"));
        assert!(is_required("yes"));
        assert!(is_required("1"));
        assert!(!is_required("optional"));
        assert!(!is_required(""));
    }

    #[test]
    fn test_xpath_leaf() {
        assert_eq!(xpath_leaf("/root/person/name/last"), "last");
        assert_eq!(xpath_leaf("id"), "id");
        assert_eq!(xpath_leaf("/"), "field");
    }
}
