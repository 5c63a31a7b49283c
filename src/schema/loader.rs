//! Schema loader for loading schema files at startup
//!
//! Schemas are stored one file per record type at `<dir>/schema_<name>.json`.
//! Missing or malformed schema files abort startup (FATAL); no partially
//! defined schema is ever observable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::RecordSchema;

/// Loads schema files from a directory and maintains an in-memory registry.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by name, iteration order deterministic
    schemas: BTreeMap<String, RecordSchema>,
}

impl SchemaLoader {
    /// Creates a new loader for the given schema directory.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            schemas: BTreeMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every schema file from the schema directory.
    ///
    /// # Errors
    ///
    /// Any unreadable or structurally invalid schema file is FATAL.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                SchemaError::malformed_schema(
                    self.schema_dir.display().to_string(),
                    format!("Failed to create schema directory: {}", e),
                )
            })?;
            return Ok(()); // No schemas to load
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_schema_file(&path)?;
        }

        Ok(())
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: RecordSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Invalid JSON: {}", e),
            )
        })?;

        schema.validate_structure().map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), e.message())
        })?;

        // Two files declaring the same schema name would make the loaded
        // registry depend on directory read order.
        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Duplicate schema name '{}'", schema.name),
            ));
        }

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Registers a schema directly (programmatic creation).
    ///
    /// # Errors
    ///
    /// Registered schemas are immutable; re-registering a name fails.
    pub fn register(&mut self, schema: RecordSchema) -> SchemaResult<()> {
        schema.validate_structure()?;

        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::schema_immutable(&schema.name));
        }

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&RecordSchema> {
        self.schemas.get(name)
    }

    /// Checks whether a schema is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns all loaded schemas in name order.
    pub fn all_schemas(&self) -> impl Iterator<Item = &RecordSchema> {
        self.schemas.values()
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Saves a schema to its standard file location.
    ///
    /// # Errors
    ///
    /// Fails if the file already exists (schemas on disk are immutable too).
    pub fn save_schema(&self, schema: &RecordSchema) -> SchemaResult<PathBuf> {
        schema.validate_structure()?;

        let path = self.schema_dir.join(format!("schema_{}.json", schema.name));
        if path.exists() {
            return Err(SchemaError::schema_immutable(&schema.name));
        }

        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                SchemaError::malformed_schema(
                    self.schema_dir.display().to_string(),
                    format!("Failed to create schema directory: {}", e),
                )
            })?;
        }

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}
