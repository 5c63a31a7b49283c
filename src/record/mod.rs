//! Record Instance subsystem for forma
//!
//! Construction is validate-then-build in one atomic step; instances are
//! immutable and carry structural equality plus a canonical string form.

mod errors;
mod instance;

pub use errors::{RecordResult, ValidationError};
pub use instance::RecordInstance;
