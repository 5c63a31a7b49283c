//! Schema error types and validation violations
//!
//! Error codes:
//! - FORMA_SCHEMA_DUPLICATE_FIELD (REJECT)
//! - FORMA_SCHEMA_INCOMPATIBLE_RULE (REJECT)
//! - FORMA_SCHEMA_BAD_PATTERN (REJECT)
//! - FORMA_SCHEMA_BAD_DEFAULT (REJECT)
//! - FORMA_SCHEMA_IMMUTABLE (REJECT)
//! - FORMA_SCHEMA_MALFORMED (FATAL)
//! - FORMA_CATALOG_MALFORMED (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller input rejected
    Reject,
    /// Startup must abort (malformed schema or catalog files)
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Two field definitions share a name
    FormaDuplicateField,
    /// Rule kind does not fit the field's type
    FormaIncompatibleRule,
    /// Pattern rule does not compile as a regex
    FormaBadPattern,
    /// Default value is declared on a required field, has the wrong
    /// type, or fails the field's own rule
    FormaBadDefault,
    /// Attempt to redefine an already registered schema
    FormaSchemaImmutable,
    /// Schema file unreadable or structurally invalid (FATAL)
    FormaSchemaMalformed,
    /// Catalog file unreadable or structurally invalid (FATAL)
    FormaCatalogMalformed,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::FormaDuplicateField => "FORMA_SCHEMA_DUPLICATE_FIELD",
            SchemaErrorCode::FormaIncompatibleRule => "FORMA_SCHEMA_INCOMPATIBLE_RULE",
            SchemaErrorCode::FormaBadPattern => "FORMA_SCHEMA_BAD_PATTERN",
            SchemaErrorCode::FormaBadDefault => "FORMA_SCHEMA_BAD_DEFAULT",
            SchemaErrorCode::FormaSchemaImmutable => "FORMA_SCHEMA_IMMUTABLE",
            SchemaErrorCode::FormaSchemaMalformed => "FORMA_SCHEMA_MALFORMED",
            SchemaErrorCode::FormaCatalogMalformed => "FORMA_CATALOG_MALFORMED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::FormaSchemaMalformed | SchemaErrorCode::FormaCatalogMalformed => {
                Severity::Fatal
            }
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Schema name if applicable
    schema: Option<String>,
    /// Field name if applicable
    field: Option<String>,
}

impl SchemaError {
    /// Create a duplicate field error
    pub fn duplicate_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        let schema = schema.into();
        let field = field.into();
        Self {
            code: SchemaErrorCode::FormaDuplicateField,
            message: format!("Schema '{}' defines field '{}' more than once", schema, field),
            schema: Some(schema),
            field: Some(field),
        }
    }

    /// Create an incompatible rule error
    pub fn incompatible_rule(
        schema: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        let schema = schema.into();
        let field = field.into();
        Self {
            code: SchemaErrorCode::FormaIncompatibleRule,
            message: format!("Schema '{}' field '{}': {}", schema, field, detail.into()),
            schema: Some(schema),
            field: Some(field),
        }
    }

    /// Create a bad pattern error
    pub fn bad_pattern(
        schema: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let schema = schema.into();
        let field = field.into();
        Self {
            code: SchemaErrorCode::FormaBadPattern,
            message: format!(
                "Schema '{}' field '{}': pattern does not compile: {}",
                schema,
                field,
                reason.into()
            ),
            schema: Some(schema),
            field: Some(field),
        }
    }

    /// Create a bad default error
    pub fn bad_default(
        schema: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let schema = schema.into();
        let field = field.into();
        Self {
            code: SchemaErrorCode::FormaBadDefault,
            message: format!(
                "Schema '{}' field '{}': invalid default: {}",
                schema,
                field,
                reason.into()
            ),
            schema: Some(schema),
            field: Some(field),
        }
    }

    /// Create a schema immutable error
    pub fn schema_immutable(schema: impl Into<String>) -> Self {
        let schema = schema.into();
        Self {
            code: SchemaErrorCode::FormaSchemaImmutable,
            message: format!("Schema '{}' is already registered and immutable", schema),
            schema: Some(schema),
            field: None,
        }
    }

    /// Create an error for a malformed schema file (FATAL)
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::FormaSchemaMalformed,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            schema: None,
            field: None,
        }
    }

    /// Create an error for a malformed catalog file (FATAL)
    pub fn malformed_catalog(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::FormaCatalogMalformed,
            message: format!(
                "Malformed catalog file '{}': {}",
                path.into(),
                reason.into()
            ),
            schema: None,
            field: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the schema name if applicable
    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Returns the field name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Violation kinds, in report order
///
/// The derived `Ord` follows declaration order and is the tie-break used
/// when one field accumulates more than one violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ViolationKind {
    /// Required field absent from the input
    MissingRequired,
    /// Value present but of the wrong semantic type
    TypeMismatch,
    /// Numeric value outside the declared inclusive bounds
    RangeViolation,
    /// String length outside the declared inclusive bounds
    LengthViolation,
    /// String does not match the declared pattern
    PatternViolation,
    /// Input field not declared by the schema
    UnknownField,
}

impl ViolationKind {
    /// Returns the string code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingRequired => "MISSING_REQUIRED",
            ViolationKind::TypeMismatch => "TYPE_MISMATCH",
            ViolationKind::RangeViolation => "RANGE_VIOLATION",
            ViolationKind::LengthViolation => "LENGTH_VIOLATION",
            ViolationKind::PatternViolation => "PATTERN_VIOLATION",
            ViolationKind::UnknownField => "UNKNOWN_FIELD",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single reported failure of a candidate value against a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Violation kind
    pub kind: ViolationKind,
    /// Field name
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl Violation {
    pub fn new(
        kind: ViolationKind,
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_required(field: impl Into<String>) -> Self {
        Self::new(
            ViolationKind::MissingRequired,
            field,
            "field to be present",
            "missing",
        )
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::TypeMismatch, field, expected, actual)
    }

    pub fn range(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::RangeViolation, field, expected, actual)
    }

    pub fn length(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::LengthViolation, field, expected, actual)
    }

    pub fn pattern(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ViolationKind::PatternViolation, field, expected, actual)
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::new(
            ViolationKind::UnknownField,
            field,
            "no undeclared fields",
            "extra field present",
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at field '{}': expected {}, got {}",
            self.kind, self.field, self.expected, self.actual
        )
    }
}
