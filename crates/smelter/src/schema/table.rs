//! The schema for a whole table.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SmelterError};
use crate::transform::Transform;

use super::field::{ErrorPolicy, FieldSpec};
use super::types::{Constraint, FieldType};

/// An ordered set of uniquely-named field specs.
///
/// A schema is validated once at construction and never mutated afterwards;
/// one instance is shared read-only across every row of an ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldSpec>", into = "Vec<FieldSpec>")]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Build and validate a schema.
    ///
    /// Checks field-name uniqueness, constraint/type compatibility, error
    /// policy consistency and that every declared pattern compiles.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SmelterError::DuplicateField {
                    name: field.name.clone(),
                });
            }

            if let FieldType::Enum { values } = &field.field_type {
                if values.is_empty() {
                    return Err(SmelterError::EmptyEnumeration {
                        name: field.name.clone(),
                    });
                }
            }

            if field.on_error == ErrorPolicy::NullOnError && !field.nullable {
                return Err(SmelterError::PolicyConflict {
                    name: field.name.clone(),
                });
            }

            for constraint in &field.constraints {
                if !constraint.compatible_with(&field.field_type) {
                    return Err(SmelterError::IncompatibleConstraint {
                        name: field.name.clone(),
                        constraint: constraint.kind(),
                        field_type: field.field_type.label(),
                    });
                }
                if let Constraint::Pattern { pattern } = constraint {
                    compile_anchored(pattern).map_err(|source| SmelterError::InvalidPattern {
                        name: field.name.clone(),
                        source,
                    })?;
                }
            }

            for transform in &field.transforms {
                if let Transform::RegexReplace { pattern, .. } = transform {
                    Regex::new(pattern).map_err(|source| SmelterError::InvalidPattern {
                        name: field.name.clone(),
                        source,
                    })?;
                }
            }
        }

        Ok(Self { fields })
    }

    /// The fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the position of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl TryFrom<Vec<FieldSpec>> for Schema {
    type Error = SmelterError;

    fn try_from(fields: Vec<FieldSpec>) -> Result<Self> {
        Schema::new(fields)
    }
}

impl From<Schema> for Vec<FieldSpec> {
    fn from(schema: Schema) -> Self {
        schema.fields
    }
}

/// Compile a pattern anchored to the whole string.
///
/// Declared patterns match the full value, not a substring; existing anchors
/// are stripped so `^x$` and `x` behave identically.
pub(crate) fn compile_anchored(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    let trimmed = pattern.strip_prefix('^').unwrap_or(pattern);
    let trimmed = strip_trailing_anchor(trimmed);
    Regex::new(&format!("^(?:{trimmed})$"))
}

/// Strip a trailing `$` anchor, leaving an escaped literal `\$` intact.
fn strip_trailing_anchor(pattern: &str) -> &str {
    if let Some(stripped) = pattern.strip_suffix('$') {
        // An odd run of preceding backslashes means the dollar is escaped.
        let backslashes = stripped.chars().rev().take_while(|c| *c == '\\').count();
        if backslashes % 2 == 0 {
            return stripped;
        }
    }
    pattern
}
