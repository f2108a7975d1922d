//! Type coercers: raw string token to typed value.
//!
//! Coercion is a pure function of the raw value, the declared type and the
//! run's [`CoercionConfig`]. Failures are values in a closed taxonomy and
//! become field diagnostics upstream; nothing here panics or does I/O.

mod config;
mod primitives;
mod temporal;

use thiserror::Error;

use crate::schema::FieldType;
use crate::validate::DiagnosticCode;
use crate::value::Value;

pub use config::CoercionConfig;

/// A typed coercion failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// Value could not be parsed as a number.
    #[error("'{raw}' is not a valid number: {message}")]
    MalformedNumber { raw: String, message: String },

    /// Numeric magnitude exceeds the target type's representable range.
    #[error("'{raw}' exceeds the representable range for {target}")]
    Overflow { raw: String, target: &'static str },

    /// Value is not in the configured boolean token sets.
    #[error("'{raw}' is not a recognized boolean token")]
    UnrecognizedBoolean { raw: String },

    /// Value matched none of the configured temporal formats.
    #[error("'{raw}' does not match any configured {target} format")]
    MalformedDateTime { raw: String, target: &'static str },

    /// Value is not in the field's allowed enumeration.
    #[error("'{raw}' is not in the allowed enumeration")]
    NotInEnumeration { raw: String },
}

impl CoercionError {
    /// The diagnostic code this failure maps to.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            CoercionError::MalformedNumber { .. } => DiagnosticCode::MalformedNumber,
            CoercionError::Overflow { .. } => DiagnosticCode::Overflow,
            CoercionError::UnrecognizedBoolean { .. } => DiagnosticCode::UnrecognizedBoolean,
            CoercionError::MalformedDateTime { .. } => DiagnosticCode::MalformedDateTime,
            CoercionError::NotInEnumeration { .. } => DiagnosticCode::NotInEnumeration,
        }
    }
}

/// Coerce a raw value to the declared type.
///
/// An absent value coerces to [`Value::Null`] for every type; coercers never
/// attempt to parse absence. Present values (including the empty string) are
/// parsed according to the declared type.
pub fn coerce(
    raw: Option<&str>,
    field_type: &FieldType,
    config: &CoercionConfig,
) -> Result<Value, CoercionError> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };

    match field_type {
        FieldType::String => Ok(Value::String(raw.to_string())),
        FieldType::Integer => primitives::coerce_integer(raw),
        FieldType::Float => primitives::coerce_float(raw),
        FieldType::Boolean => primitives::coerce_boolean(raw, config),
        FieldType::Date => temporal::coerce_date(raw, &config.date_formats),
        FieldType::Time => temporal::coerce_time(raw, &config.time_formats),
        FieldType::DateTime => temporal::coerce_datetime(raw, &config.datetime_formats),
        FieldType::Enum { values } => primitives::coerce_enum(raw, values, config),
    }
}
