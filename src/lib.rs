//! forma - a strict, deterministic, schema-driven record engine
//!
//! Declarative field schemas (programmatic, JSON files, or a CSV schema
//! catalog) produce immutable, fully validated record instances with
//! structural equality and a deterministic canonical string form.

pub mod cli;
pub mod observability;
pub mod record;
pub mod schema;
