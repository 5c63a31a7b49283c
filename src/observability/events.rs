//! Observability events for forma
//!
//! Events are explicit and typed; one log line per event.

use std::fmt;

use super::logger::Severity;

/// Observable events in the record engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Schema lifecycle
    /// Schemas loaded from the schema directory
    SchemasLoaded,
    /// A schema was written to its file
    SchemaSaved,

    // Catalog import
    /// Catalog import started
    CatalogImportStart,
    /// Catalog import complete
    CatalogImportComplete,

    // Validation & records
    /// A candidate value set was validated
    ValidationRun,
    /// Validation reported violations
    ValidationFailed,
    /// A record instance was created
    RecordCreated,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaSaved => "SCHEMA_SAVED",
            Event::CatalogImportStart => "CATALOG_IMPORT_START",
            Event::CatalogImportComplete => "CATALOG_IMPORT_COMPLETE",
            Event::ValidationRun => "VALIDATION_RUN",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::RecordCreated => "RECORD_CREATED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ValidationFailed => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
