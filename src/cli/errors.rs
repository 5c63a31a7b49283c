//! CLI-specific error types
//!
//! Every CLI error exits the process with a non-zero status.

use std::path::Path;
use thiserror::Error;

use crate::record::ValidationError;
use crate::schema::SchemaError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Schema definition, loading, or catalog import failed
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Record creation failed
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Requested schema is not registered
    #[error("Schema '{0}' not found in the schema directory")]
    SchemaNotFound(String),

    /// Input file could not be read or parsed
    #[error("Failed to read input '{path}': {reason}")]
    InputUnreadable { path: String, reason: String },

    /// Input JSON was not an object
    #[error("Input '{0}' must be a JSON object of field values")]
    InputNotObject(String),

    /// Validation reported violations (already printed)
    #[error("Validation failed with {0} violation(s)")]
    ValidationFailed(usize),
}

impl CliError {
    pub fn input_unreadable(path: &Path, reason: impl Into<String>) -> Self {
        Self::InputUnreadable {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}
