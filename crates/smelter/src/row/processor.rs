//! Applies the schema to one raw row at a time.

use crate::coerce::CoercionConfig;
use crate::error::Result;
use crate::schema::{FieldSource, Schema};
use crate::validate::{Diagnostic, DiagnosticCode, FieldValidator};

use super::{RawRow, TypedRow};

/// Outcome of processing one raw row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    /// The typed row when admitted; `None` when rejected.
    pub row: Option<TypedRow>,
    /// All diagnostics for the row: row-level findings first, then field
    /// findings in schema declaration order.
    pub diagnostics: Vec<Diagnostic>,
}

impl RowOutcome {
    /// Whether the row was admitted.
    pub fn admitted(&self) -> bool {
        self.row.is_some()
    }
}

/// Processes raw rows against an immutable schema.
///
/// Built once per run: field validators (and their compiled patterns) are
/// shared across all rows. Processing never short-circuits on the first bad
/// field — every field is attempted so one pass reports the row's complete
/// set of problems.
#[derive(Debug)]
pub struct RowProcessor<'a> {
    schema: &'a Schema,
    validators: Vec<FieldValidator<'a>>,
    source_name: Option<&'a str>,
}

impl<'a> RowProcessor<'a> {
    /// Compile a processor for the schema.
    pub fn new(
        schema: &'a Schema,
        config: &'a CoercionConfig,
        source_name: Option<&'a str>,
    ) -> Result<Self> {
        let validators = schema
            .fields()
            .iter()
            .map(|spec| FieldValidator::new(spec, config))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            schema,
            validators,
            source_name,
        })
    }

    /// Process one raw row.
    ///
    /// Admission: the row is admitted exactly when no diagnostic of severity
    /// error or above was produced for it.
    pub fn process(&self, raw: &RawRow) -> RowOutcome {
        let mut diagnostics = Vec::new();

        if raw.malformed {
            diagnostics.push(Diagnostic::row_level(
                raw.index,
                DiagnosticCode::RowShapeMismatch,
                "source flagged the record as structurally malformed",
            ));
        } else if raw.cells.len() != self.schema.len() {
            diagnostics.push(Diagnostic::row_level(
                raw.index,
                DiagnosticCode::RowShapeMismatch,
                format!(
                    "row has {} tokens but the schema declares {} fields",
                    raw.cells.len(),
                    self.schema.len()
                ),
            ));
        }

        let mut typed = TypedRow::with_capacity(self.schema.len());
        let mut complete = true;

        for (position, validator) in self.validators.iter().enumerate() {
            let spec = validator.spec();
            let raw_value = self.resolve(raw, position);
            let result = validator.validate(raw_value.as_deref());

            for issue in result.issues {
                diagnostics.push(Diagnostic {
                    row: raw.index,
                    field: Some(spec.name.clone()),
                    severity: issue.severity,
                    code: issue.code,
                    message: issue.message,
                });
            }

            match result.value {
                Some(value) => typed.insert(spec.name.clone(), value),
                None => complete = false,
            }
        }

        let admitted = complete && !diagnostics.iter().any(|d| d.severity.rejects_row());

        RowOutcome {
            row: admitted.then_some(typed),
            diagnostics,
        }
    }

    /// Resolve a field's raw value from its declared source.
    fn resolve(&self, raw: &RawRow, position: usize) -> Option<String> {
        match &self.schema.fields()[position].source {
            FieldSource::Column => raw.cells.get(position).cloned().flatten(),
            FieldSource::Constant { value } => Some(value.clone()),
            FieldSource::RowIndex => Some(raw.index.to_string()),
            FieldSource::RowNumber => Some((raw.index + 1).to_string()),
            FieldSource::SourceName => self.source_name.map(|n| n.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Constraint, FieldSpec, FieldType};
    use crate::validate::Severity;
    use crate::value::Value;

    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::new("id", FieldType::Integer).required(),
            FieldSpec::new("name", FieldType::String),
            FieldSpec::new("active", FieldType::Boolean),
        ])
        .unwrap()
    }

    #[test]
    fn test_admits_clean_row() {
        let schema = schema();
        let config = CoercionConfig::default();
        let processor = RowProcessor::new(&schema, &config, None).unwrap();

        let outcome = processor.process(&RawRow::from_strings(0, vec!["1", "Alice", "yes"]));
        assert!(outcome.admitted());
        assert!(outcome.diagnostics.is_empty());

        let row = outcome.row.unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("id"), Some(&Value::Integer(1)));
        assert_eq!(row.get("active"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_no_short_circuit_reports_every_bad_field() {
        let schema = Schema::new(vec![
            FieldSpec::new("a", FieldType::Integer).required(),
            FieldSpec::new("b", FieldType::Integer).required(),
        ])
        .unwrap();
        let config = CoercionConfig::default();
        let processor = RowProcessor::new(&schema, &config, None).unwrap();

        let outcome = processor.process(&RawRow::from_strings(0, vec!["x", "y"]));
        assert!(!outcome.admitted());
        assert_eq!(outcome.diagnostics.len(), 2);
        assert_eq!(outcome.diagnostics[0].field.as_deref(), Some("a"));
        assert_eq!(outcome.diagnostics[1].field.as_deref(), Some("b"));
    }

    #[test]
    fn test_row_level_diagnostics_precede_field_diagnostics() {
        let schema = schema();
        let config = CoercionConfig::default();
        let processor = RowProcessor::new(&schema, &config, None).unwrap();

        // Two tokens for a three-field schema, and a bad id.
        let raw = RawRow::new(5, vec![Some("bad".to_string()), None]);
        let outcome = processor.process(&raw);
        assert!(!outcome.admitted());
        assert_eq!(outcome.diagnostics[0].code, DiagnosticCode::RowShapeMismatch);
        assert!(outcome.diagnostics[0].field.is_none());
        assert_eq!(outcome.diagnostics[1].field.as_deref(), Some("id"));
    }

    #[test]
    fn test_warnings_do_not_block_admission() {
        let schema = Schema::new(vec![
            FieldSpec::new("id", FieldType::Integer).required(),
            FieldSpec::new("score", FieldType::Float).null_on_error(),
        ])
        .unwrap();
        let config = CoercionConfig::default();
        let processor = RowProcessor::new(&schema, &config, None).unwrap();

        let outcome = processor.process(&RawRow::from_strings(0, vec!["1", "not-a-float"]));
        assert!(outcome.admitted());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            outcome.row.unwrap().get("score"),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_malformed_flag_rejects_row() {
        let schema = schema();
        let config = CoercionConfig::default();
        let processor = RowProcessor::new(&schema, &config, None).unwrap();

        let raw = RawRow::from_strings(2, vec!["1", "Alice", "yes"]).malformed();
        let outcome = processor.process(&raw);
        assert!(!outcome.admitted());
        assert_eq!(outcome.diagnostics[0].code, DiagnosticCode::RowShapeMismatch);
    }

    #[test]
    fn test_constraint_violation_rejects() {
        let schema = Schema::new(vec![FieldSpec::new("age", FieldType::Integer)
            .with_constraint(Constraint::Range {
                min: Some(0.0),
                max: Some(120.0),
            })])
        .unwrap();
        let config = CoercionConfig::default();
        let processor = RowProcessor::new(&schema, &config, None).unwrap();

        let outcome = processor.process(&RawRow::from_strings(0, vec!["200"]));
        assert!(!outcome.admitted());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(
            outcome.diagnostics[0].code,
            DiagnosticCode::ConstraintViolation
        );
    }

    #[test]
    fn test_synthesized_field_sources() {
        let schema = Schema::new(vec![
            FieldSpec::new("value", FieldType::String),
            FieldSpec::new("row_number", FieldType::Integer)
                .with_source(FieldSource::RowNumber),
            FieldSpec::new("origin", FieldType::String).with_source(FieldSource::SourceName),
            FieldSpec::new("batch", FieldType::String).with_source(FieldSource::Constant {
                value: "2024-q1".to_string(),
            }),
        ])
        .unwrap();
        let config = CoercionConfig::default();
        let processor = RowProcessor::new(&schema, &config, Some("input.csv")).unwrap();

        let raw = RawRow::new(4, vec![Some("x".to_string()), None, None, None]);
        let outcome = processor.process(&raw);
        let row = outcome.row.unwrap();
        assert_eq!(row.get("row_number"), Some(&Value::Integer(5)));
        assert_eq!(
            row.get("origin"),
            Some(&Value::String("input.csv".to_string()))
        );
        assert_eq!(
            row.get("batch"),
            Some(&Value::String("2024-q1".to_string()))
        );
    }

    #[test]
    fn test_typed_row_matches_schema_field_order() {
        let schema = schema();
        let config = CoercionConfig::default();
        let processor = RowProcessor::new(&schema, &config, None).unwrap();

        let outcome = processor.process(&RawRow::from_strings(0, vec!["1", "Alice", "no"]));
        let names: Vec<&str> = outcome.row.as_ref().unwrap().iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["id", "name", "active"]);
    }
}
