//! Diagnostic types for per-row and per-field validation findings.

use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// Potential issue; does not block row admission.
    Warning,
    /// Definite issue; rejects the affected row.
    Error,
    /// Unrecoverable issue; aborts the whole run.
    Fatal,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }

    /// Whether a diagnostic at this severity rejects its row.
    pub fn rejects_row(&self) -> bool {
        *self >= Severity::Error
    }

    /// One step down: Error becomes Warning, Warning becomes Info.
    ///
    /// Used by the null-on-error policy, which admits the row with a nulled
    /// field instead of rejecting it.
    pub fn downgrade(&self) -> Severity {
        match self {
            Severity::Fatal => Severity::Fatal,
            Severity::Error => Severity::Warning,
            Severity::Warning => Severity::Info,
            Severity::Info => Severity::Info,
        }
    }
}

/// Closed taxonomy of diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// Absent/empty value in a non-nullable field.
    MissingRequiredValue,
    /// Value could not be parsed as a number.
    MalformedNumber,
    /// Numeric magnitude exceeds the representable range.
    Overflow,
    /// Value is not a recognized boolean token.
    UnrecognizedBoolean,
    /// Value matched none of the configured temporal formats.
    MalformedDateTime,
    /// Value is not in the field's allowed enumeration.
    NotInEnumeration,
    /// A declared constraint was violated.
    ConstraintViolation,
    /// A pre-coercion transform failed.
    TransformFailed,
    /// The raw row's token count does not match the schema.
    RowShapeMismatch,
    /// Source-level inconsistency the pipeline cannot continue past.
    StructuralCorruption,
}

impl DiagnosticCode {
    /// The default severity attached to this code.
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticCode::StructuralCorruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Get a human-readable label for the code.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticCode::MissingRequiredValue => "Missing Required Value",
            DiagnosticCode::MalformedNumber => "Malformed Number",
            DiagnosticCode::Overflow => "Overflow",
            DiagnosticCode::UnrecognizedBoolean => "Unrecognized Boolean",
            DiagnosticCode::MalformedDateTime => "Malformed Date/Time",
            DiagnosticCode::NotInEnumeration => "Not In Enumeration",
            DiagnosticCode::ConstraintViolation => "Constraint Violation",
            DiagnosticCode::TransformFailed => "Transform Failed",
            DiagnosticCode::RowShapeMismatch => "Row Shape Mismatch",
            DiagnosticCode::StructuralCorruption => "Structural Corruption",
        }
    }
}

/// A single validation finding, scoped to a row and optionally a field.
///
/// Diagnostics are append-only values: the engine hands each one to the sink
/// the moment it is produced and never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Zero-based index of the affected row.
    pub row: u64,
    /// Affected field name, when the finding is field-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Severity level.
    pub severity: Severity,
    /// Taxonomy code.
    pub code: DiagnosticCode,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Create a row-scoped diagnostic at the code's default severity.
    pub fn row_level(row: u64, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            row,
            field: None,
            severity: code.default_severity(),
            code,
            message: message.into(),
        }
    }

    /// Create a field-scoped diagnostic at the code's default severity.
    pub fn field_level(
        row: u64,
        field: impl Into<String>,
        code: DiagnosticCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row,
            field: Some(field.into()),
            severity: code.default_severity(),
            code,
            message: message.into(),
        }
    }

    /// Override the severity (e.g. the null-on-error downgrade).
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}
