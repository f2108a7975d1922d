//! Field-level validation: null handling, transforms, coercion, constraints.

use regex::Regex;

use crate::coerce::{CoercionConfig, coerce};
use crate::error::{Result, SmelterError};
use crate::schema::{Constraint, ErrorPolicy, FieldSpec, compile_anchored};
use crate::transform::Transform;
use crate::value::Value;

use super::diagnostic::{DiagnosticCode, Severity};

/// A field-scoped finding, without row location (the row processor attaches
/// that when it turns issues into diagnostics).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    /// Taxonomy code.
    pub code: DiagnosticCode,
    /// Severity after any policy downgrade.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// Outcome of validating one raw value against one field spec.
///
/// `value` is `Some` when the field produced a usable typed value (possibly
/// an explicit null under the null-on-error policy) and `None` when the
/// failure rejects the row.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResult {
    /// The typed value, when one was produced.
    pub value: Option<Value>,
    /// Findings, in the order they occurred.
    pub issues: Vec<FieldIssue>,
}

impl FieldResult {
    fn ok(value: Value) -> Self {
        Self {
            value: Some(value),
            issues: Vec::new(),
        }
    }
}

/// Validates raw values against a single field spec.
///
/// Compiled once per run so regex patterns in constraints and transforms are
/// not recompiled per row. Validation itself is pure: no state is mutated
/// between calls.
#[derive(Debug)]
pub struct FieldValidator<'a> {
    spec: &'a FieldSpec,
    config: &'a CoercionConfig,
    /// Parallel to `spec.transforms`; `Some` only for regex replaces.
    transform_patterns: Vec<Option<Regex>>,
    /// Parallel to `spec.constraints`; `Some` only for pattern constraints.
    constraint_patterns: Vec<Option<Regex>>,
}

impl<'a> FieldValidator<'a> {
    /// Compile the validator for one field.
    pub fn new(spec: &'a FieldSpec, config: &'a CoercionConfig) -> Result<Self> {
        let transform_patterns = spec
            .transforms
            .iter()
            .map(|t| match t {
                Transform::RegexReplace { pattern, .. } => Regex::new(pattern)
                    .map(Some)
                    .map_err(|source| SmelterError::InvalidPattern {
                        name: spec.name.clone(),
                        source,
                    }),
                _ => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?;

        let constraint_patterns = spec
            .constraints
            .iter()
            .map(|c| match c {
                Constraint::Pattern { pattern } => compile_anchored(pattern)
                    .map(Some)
                    .map_err(|source| SmelterError::InvalidPattern {
                        name: spec.name.clone(),
                        source,
                    }),
                _ => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            spec,
            config,
            transform_patterns,
            constraint_patterns,
        })
    }

    /// The field spec this validator checks against.
    pub fn spec(&self) -> &FieldSpec {
        self.spec
    }

    /// Validate one raw value.
    ///
    /// The value is trimmed and classified (empty strings and configured
    /// null markers count as absent), run through the declared transforms,
    /// checked against nullability, coerced, and finally checked against the
    /// declared constraints in order — the first violated constraint wins.
    pub fn validate(&self, raw: Option<&str>) -> FieldResult {
        let mut current = classify(raw, self.config);

        for (transform, compiled) in self.spec.transforms.iter().zip(&self.transform_patterns) {
            match transform.apply(current.take(), compiled.as_ref()) {
                Ok(next) => current = next,
                Err(err) => {
                    return self.fail(
                        DiagnosticCode::TransformFailed,
                        format!("{} transform failed: {err}", transform.kind()),
                    );
                }
            }
        }

        if current.is_none() {
            if self.spec.nullable {
                return FieldResult::ok(Value::Null);
            }
            return self.fail(
                DiagnosticCode::MissingRequiredValue,
                format!("null value in non-nullable field '{}'", self.spec.name),
            );
        }

        let value = match coerce(current.as_deref(), &self.spec.field_type, self.config) {
            Ok(value) => value,
            Err(err) => return self.fail(err.code(), err.to_string()),
        };

        for (constraint, compiled) in self.spec.constraints.iter().zip(&self.constraint_patterns) {
            if let Some(violation) = check_constraint(&value, constraint, compiled.as_ref()) {
                return self.fail(
                    DiagnosticCode::ConstraintViolation,
                    format!("{} constraint violated: {violation}", constraint.kind()),
                );
            }
        }

        FieldResult::ok(value)
    }

    /// Apply the field's error policy to a failure.
    fn fail(&self, code: DiagnosticCode, message: String) -> FieldResult {
        match self.spec.on_error {
            ErrorPolicy::Reject => FieldResult {
                value: None,
                issues: vec![FieldIssue {
                    code,
                    severity: code.default_severity(),
                    message,
                }],
            },
            ErrorPolicy::NullOnError => FieldResult {
                value: Some(Value::Null),
                issues: vec![FieldIssue {
                    code,
                    severity: code.default_severity().downgrade(),
                    message: format!("{message} (field nulled)"),
                }],
            },
        }
    }
}

/// Trim and classify a raw value, mapping empties and null markers to absent.
fn classify(raw: Option<&str>, config: &CoercionConfig) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || config.is_null_marker(trimmed) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Check one constraint, returning a violation message when it fails.
fn check_constraint(value: &Value, constraint: &Constraint, compiled: Option<&Regex>) -> Option<String> {
    match constraint {
        Constraint::Range { min, max } => {
            match value {
                Value::Integer(i) => {
                    if let Some(min) = min {
                        if int_below(*i, *min) {
                            return Some(format!("{i} is below the minimum {min}"));
                        }
                    }
                    if let Some(max) = max {
                        if int_above(*i, *max) {
                            return Some(format!("{i} is above the maximum {max}"));
                        }
                    }
                }
                Value::Float(n) => {
                    if let Some(min) = min {
                        if n < min {
                            return Some(format!("{n} is below the minimum {min}"));
                        }
                    }
                    if let Some(max) = max {
                        if n > max {
                            return Some(format!("{n} is above the maximum {max}"));
                        }
                    }
                }
                _ => {}
            }
            None
        }
        Constraint::Length { min, max } => {
            let Value::String(s) = value else { return None };
            let len = s.chars().count();
            if let Some(min) = min {
                if len < *min {
                    return Some(format!("length {len} is below the minimum {min}"));
                }
            }
            if let Some(max) = max {
                if len > *max {
                    return Some(format!("length {len} is above the maximum {max}"));
                }
            }
            None
        }
        Constraint::Pattern { pattern } => {
            let Value::String(s) = value else { return None };
            match compiled {
                Some(re) if re.is_match(s) => None,
                // Schema validation compiles every pattern, so the fallback
                // only guards direct misuse.
                Some(_) | None => Some(format!("'{s}' does not match pattern '{pattern}'")),
            }
        }
        Constraint::OneOf { values } => {
            let Value::String(s) = value else { return None };
            if values.iter().any(|v| v == s) {
                None
            } else {
                Some(format!("'{s}' is not in the allowed set"))
            }
        }
    }
}

// Casting an i64 to f64 rounds above 2^53, which can mask a bound
// violation, so integer values are compared against the bound's integer
// envelope instead. `i < min` holds exactly when `i < ceil(min)`, and
// `i > max` exactly when `i > floor(max)`.
fn int_below(i: i64, min: f64) -> bool {
    if min.is_nan() {
        return false;
    }
    let ceil = min.ceil();
    if ceil >= i64::MAX as f64 {
        return true;
    }
    if ceil < i64::MIN as f64 {
        return false;
    }
    i < ceil as i64
}

fn int_above(i: i64, max: f64) -> bool {
    if max.is_nan() {
        return false;
    }
    let floor = max.floor();
    if floor >= i64::MAX as f64 {
        return false;
    }
    if floor < i64::MIN as f64 {
        return true;
    }
    i > floor as i64
}
