//! Record Schema subsystem for forma
//!
//! # Design Principles
//!
//! - Schemas are built once, validated structurally, then immutable
//! - Validation reports every violation, deterministically ordered
//! - No nulls, no implicit coercion, no partial validation
//! - Required fields never carry defaults

mod catalog;
mod errors;
mod loader;
mod types;
pub mod validator;

pub use catalog::{import_catalog, MODEL_COLUMNS};
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity, Violation, ViolationKind};
pub use loader::SchemaLoader;
pub use types::{FieldDef, FieldRule, FieldType, RecordSchema};
pub use validator::validate;
