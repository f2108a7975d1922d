//! Core type definitions for the declared schema.

use serde::{Deserialize, Serialize};

/// Declared data type for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// Text/string values (identity coercion).
    String,
    /// Whole numbers, 64-bit signed.
    Integer,
    /// Floating-point numbers, 64-bit.
    Float,
    /// Boolean values, matched against a configured token set.
    Boolean,
    /// Date only (no time component).
    Date,
    /// Time only (no date component).
    Time,
    /// Date and time.
    DateTime,
    /// One of a fixed set of allowed string values.
    Enum { values: Vec<String> },
}

impl FieldType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::Time | FieldType::DateTime)
    }

    /// A short label for messages and errors.
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::DateTime => "datetime",
            FieldType::Enum { .. } => "enum",
        }
    }
}

/// A declared constraint on a field's coerced values.
///
/// Constraints are checked in declaration order after coercion succeeds;
/// the first violated constraint rejects the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// Numeric values must be in a range (bounds inclusive).
    Range { min: Option<f64>, max: Option<f64> },
    /// String length (in characters) must be in a range (bounds inclusive).
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// String values must fully match a regex pattern.
    Pattern { pattern: String },
    /// String values must be one of a fixed set.
    OneOf { values: Vec<String> },
}

impl Constraint {
    /// A short label for this constraint kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::Range { .. } => "range",
            Constraint::Length { .. } => "length",
            Constraint::Pattern { .. } => "pattern",
            Constraint::OneOf { .. } => "one_of",
        }
    }

    /// Whether this constraint is meaningful for the declared type.
    ///
    /// Range applies to numeric fields; length, pattern and allowed-set
    /// constraints apply to plain string fields. Enum fields carry their
    /// allowed set in the type itself.
    pub fn compatible_with(&self, field_type: &FieldType) -> bool {
        match self {
            Constraint::Range { .. } => field_type.is_numeric(),
            Constraint::Length { .. } | Constraint::Pattern { .. } | Constraint::OneOf { .. } => {
                matches!(field_type, FieldType::String)
            }
        }
    }
}
