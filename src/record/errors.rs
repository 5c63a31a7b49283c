//! Record construction errors

use thiserror::Error;

use crate::schema::Violation;

/// Result type for record operations
pub type RecordResult<T> = Result<T, ValidationError>;

/// One or more field violations found while creating a record.
///
/// Carries the complete violation list so a caller can present every
/// problem at once; construction is all-or-nothing.
#[derive(Debug, Clone, Error)]
#[error("Record validation failed for schema '{schema}' with {} violation(s)", .violations.len())]
pub struct ValidationError {
    /// Schema the candidate values were checked against
    pub schema: String,
    /// Every violation, in deterministic report order
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(schema: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            schema: schema.into(),
            violations,
        }
    }
}
