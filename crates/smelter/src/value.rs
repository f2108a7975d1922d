//! Typed cell values produced by coercion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::schema::FieldType;

/// A single typed value in an admitted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Explicit null (absent or empty input in a nullable field).
    Null,
    /// UTF-8 string.
    String(String),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Boolean(bool),
    /// Calendar date without time.
    Date(NaiveDate),
    /// Time of day without date.
    Time(NaiveTime),
    /// Date and time without offset.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value's dynamic type is valid for the declared field type.
    ///
    /// Null is valid for every type; nullability is enforced separately by
    /// the field validator.
    pub fn matches_type(&self, field_type: &FieldType) -> bool {
        match (self, field_type) {
            (Value::Null, _) => true,
            (Value::String(_), FieldType::String) => true,
            (Value::String(_), FieldType::Enum { .. }) => true,
            (Value::Integer(_), FieldType::Integer) => true,
            (Value::Float(_), FieldType::Float) => true,
            (Value::Boolean(_), FieldType::Boolean) => true,
            (Value::Date(_), FieldType::Date) => true,
            (Value::Time(_), FieldType::Time) => true,
            (Value::DateTime(_), FieldType::DateTime) => true,
            _ => false,
        }
    }

    /// A short label for the value's dynamic type, used in messages.
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
        }
    }
}
