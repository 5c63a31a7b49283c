//! CLI command implementations

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event};
use crate::record::RecordInstance;
use crate::schema::{self, SchemaLoader};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatches a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Import { catalog, out } => import(&catalog, &out),
        Command::Schemas { dir } => list_schemas(&dir),
        Command::Validate { dir, schema, input } => validate(&dir, &schema, &input),
        Command::Render { dir, schema, input } => render(&dir, &schema, &input),
    }
}

/// Imports a catalog and saves every derived schema.
pub fn import(catalog: &Path, out: &Path) -> CliResult<()> {
    log_event_with_fields(
        Event::CatalogImportStart,
        &[("catalog", &catalog.display().to_string())],
    );

    let schemas = schema::import_catalog(catalog)?;
    let loader = SchemaLoader::new(out);
    for schema in &schemas {
        let path = loader.save_schema(schema)?;
        log_event_with_fields(
            Event::SchemaSaved,
            &[
                ("schema", schema.name.as_str()),
                ("path", &path.display().to_string()),
            ],
        );
        println!("saved schema '{}' to {}", schema.name, path.display());
    }

    log_event_with_fields(
        Event::CatalogImportComplete,
        &[("schemas", &schemas.len().to_string())],
    );
    Ok(())
}

/// Lists registered schemas with their field counts.
pub fn list_schemas(dir: &Path) -> CliResult<()> {
    let loader = load_schemas(dir)?;
    for schema in loader.all_schemas() {
        println!("{} ({} fields)", schema.name, schema.field_count());
    }
    Ok(())
}

/// Validates an input file against a schema, printing every violation.
pub fn validate(dir: &Path, name: &str, input: &Path) -> CliResult<()> {
    let loader = load_schemas(dir)?;
    let schema = loader
        .get(name)
        .ok_or_else(|| CliError::SchemaNotFound(name.to_string()))?;
    let values = read_values(input)?;

    let violations = schema::validate(schema, &values);
    log_event_with_fields(
        Event::ValidationRun,
        &[
            ("schema", name),
            ("violations", &violations.len().to_string()),
        ],
    );

    if violations.is_empty() {
        println!("ok: {} conforms to schema '{}'", input.display(), name);
        return Ok(());
    }

    for violation in &violations {
        println!("{}", violation);
    }
    log_event_with_fields(Event::ValidationFailed, &[("schema", name)]);
    Err(CliError::ValidationFailed(violations.len()))
}

/// Creates a record from an input file and prints its canonical form.
pub fn render(dir: &Path, name: &str, input: &Path) -> CliResult<()> {
    let loader = load_schemas(dir)?;
    let schema = loader
        .get(name)
        .cloned()
        .ok_or_else(|| CliError::SchemaNotFound(name.to_string()))?;
    let values = read_values(input)?;

    let record = match RecordInstance::create(Arc::new(schema), values) {
        Ok(record) => record,
        Err(e) => {
            for violation in &e.violations {
                eprintln!("{}", violation);
            }
            log_event_with_fields(Event::ValidationFailed, &[("schema", name)]);
            return Err(e.into());
        }
    };

    log_event_with_fields(Event::RecordCreated, &[("schema", name)]);
    println!("{}", record.canonical_form());
    Ok(())
}

/// Loads every schema from the directory.
fn load_schemas(dir: &Path) -> CliResult<SchemaLoader> {
    let mut loader = SchemaLoader::new(dir);
    loader.load_all()?;
    log_event_with_fields(
        Event::SchemasLoaded,
        &[("count", &loader.schema_count().to_string())],
    );
    Ok(loader)
}

/// Reads a JSON object of candidate field values.
fn read_values(input: &Path) -> CliResult<Map<String, Value>> {
    let content =
        fs::read_to_string(input).map_err(|e| CliError::input_unreadable(input, e.to_string()))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| CliError::input_unreadable(input, e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::InputNotObject(input.display().to_string())),
    }
}
