//! Per-field schema definition.

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

use super::types::{Constraint, FieldType};

/// Where a field draws its raw value from.
///
/// Most fields read the cell at their schema position; the remaining
/// variants synthesize a raw value from the run context instead, and the
/// corresponding cell in the raw row is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldSource {
    /// The positional cell in the raw row (the default).
    #[default]
    Column,
    /// A fixed raw value, identical for every row.
    Constant { value: String },
    /// The zero-based index of the row within the run.
    RowIndex,
    /// The one-based number of the row within the run.
    RowNumber,
    /// The source name supplied to the engine (e.g. the input file name).
    SourceName,
}

/// What to do when a field's transform, coercion or constraint check fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// The failure rejects the whole row (the default).
    #[default]
    Reject,
    /// The field is nulled and the failure is downgraded to a warning,
    /// letting the row through. Requires the field to be nullable.
    NullOnError,
}

/// A single named, typed field in a [`super::Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field/column name, unique within the schema.
    pub name: String,
    /// Declared data type.
    pub field_type: FieldType,
    /// Whether absent/empty input is allowed (yields an explicit null).
    pub nullable: bool,
    /// Where the raw value comes from.
    #[serde(default)]
    pub source: FieldSource,
    /// Raw-string transforms applied in order before coercion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<Transform>,
    /// Constraints checked in order after coercion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    /// Failure handling for this field.
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

impl FieldSpec {
    /// Create a nullable field with no transforms or constraints.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable: true,
            source: FieldSource::Column,
            transforms: Vec::new(),
            constraints: Vec::new(),
            on_error: ErrorPolicy::Reject,
        }
    }

    /// Mark the field as required (absent/empty input becomes an error).
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Set the raw value source.
    pub fn with_source(mut self, source: FieldSource) -> Self {
        self.source = source;
        self
    }

    /// Append a pre-coercion transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Append a post-coercion constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Null this field instead of rejecting the row when it fails.
    pub fn null_on_error(mut self) -> Self {
        self.on_error = ErrorPolicy::NullOnError;
        self
    }
}
