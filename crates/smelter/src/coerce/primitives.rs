//! Coercers for numeric, boolean and enumerated values.

use std::num::IntErrorKind;

use crate::value::Value;

use super::CoercionError;
use super::config::CoercionConfig;

pub(super) fn coerce_integer(raw: &str) -> Result<Value, CoercionError> {
    match raw.parse::<i64>() {
        Ok(n) => Ok(Value::Integer(n)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(CoercionError::Overflow {
                raw: raw.to_string(),
                target: "integer",
            }),
            _ => Err(CoercionError::MalformedNumber {
                raw: raw.to_string(),
                message: err.to_string(),
            }),
        },
    }
}

pub(super) fn coerce_float(raw: &str) -> Result<Value, CoercionError> {
    match raw.parse::<f64>() {
        // A finite literal can still parse to infinity when its magnitude
        // exceeds f64; report that as overflow, not a malformed number.
        Ok(n) if n.is_infinite() => Err(CoercionError::Overflow {
            raw: raw.to_string(),
            target: "float",
        }),
        // NaN compares false against every range bound, so admitting it
        // would let it slip past any declared constraint.
        Ok(n) if n.is_nan() => Err(CoercionError::MalformedNumber {
            raw: raw.to_string(),
            message: "not a finite number".to_string(),
        }),
        Ok(n) => Ok(Value::Float(n)),
        Err(err) => Err(CoercionError::MalformedNumber {
            raw: raw.to_string(),
            message: err.to_string(),
        }),
    }
}

pub(super) fn coerce_boolean(raw: &str, config: &CoercionConfig) -> Result<Value, CoercionError> {
    if token_match(&config.true_tokens, raw) {
        Ok(Value::Boolean(true))
    } else if token_match(&config.false_tokens, raw) {
        Ok(Value::Boolean(false))
    } else {
        Err(CoercionError::UnrecognizedBoolean {
            raw: raw.to_string(),
        })
    }
}

/// Matches against the allowed set, returning the canonical allowed value
/// (significant under case-insensitive matching).
pub(super) fn coerce_enum(
    raw: &str,
    values: &[String],
    config: &CoercionConfig,
) -> Result<Value, CoercionError> {
    let found = if config.case_sensitive_enums {
        values.iter().find(|v| v.as_str() == raw)
    } else {
        values.iter().find(|v| v.eq_ignore_ascii_case(raw))
    };

    match found {
        Some(canonical) => Ok(Value::String(canonical.clone())),
        None => Err(CoercionError::NotInEnumeration {
            raw: raw.to_string(),
        }),
    }
}

fn token_match(tokens: &[String], raw: &str) -> bool {
    tokens.iter().any(|t| t.eq_ignore_ascii_case(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_parse() {
        assert_eq!(coerce_integer("17").unwrap(), Value::Integer(17));
        assert_eq!(coerce_integer("-42").unwrap(), Value::Integer(-42));
    }

    #[test]
    fn test_integer_malformed_vs_overflow() {
        assert!(matches!(
            coerce_integer("abc"),
            Err(CoercionError::MalformedNumber { .. })
        ));
        assert!(matches!(
            coerce_integer("99999999999999999999999"),
            Err(CoercionError::Overflow { .. })
        ));
        assert!(matches!(
            coerce_integer("-99999999999999999999999"),
            Err(CoercionError::Overflow { .. })
        ));
    }

    #[test]
    fn test_float_parse() {
        assert_eq!(coerce_float("3.25").unwrap(), Value::Float(3.25));
        assert_eq!(coerce_float("1e3").unwrap(), Value::Float(1000.0));
    }

    #[test]
    fn test_float_overflow() {
        assert!(matches!(
            coerce_float("1e999"),
            Err(CoercionError::Overflow { .. })
        ));
    }

    #[test]
    fn test_float_nan_rejected() {
        for raw in ["NaN", "nan", "-NaN"] {
            assert!(matches!(
                coerce_float(raw),
                Err(CoercionError::MalformedNumber { .. })
            ));
        }
    }

    #[test]
    fn test_boolean_token_sets() {
        let config = CoercionConfig::default();
        assert_eq!(
            coerce_boolean("yes", &config).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(coerce_boolean("NO", &config).unwrap(), Value::Boolean(false));
        assert_eq!(coerce_boolean("1", &config).unwrap(), Value::Boolean(true));
        assert!(matches!(
            coerce_boolean("oui", &config),
            Err(CoercionError::UnrecognizedBoolean { .. })
        ));
    }

    #[test]
    fn test_boolean_custom_tokens() {
        let config = CoercionConfig {
            true_tokens: vec!["oui".to_string()],
            false_tokens: vec!["non".to_string()],
            ..CoercionConfig::default()
        };
        assert_eq!(
            coerce_boolean("Oui", &config).unwrap(),
            Value::Boolean(true)
        );
        assert!(coerce_boolean("yes", &config).is_err());
    }

    #[test]
    fn test_enum_case_sensitivity() {
        let values = vec!["CD".to_string(), "UC".to_string()];
        let strict = CoercionConfig::default();
        assert!(coerce_enum("cd", &values, &strict).is_err());

        let lenient = CoercionConfig {
            case_sensitive_enums: false,
            ..CoercionConfig::default()
        };
        // Canonical casing comes from the allowed set, not the input.
        assert_eq!(
            coerce_enum("cd", &values, &lenient).unwrap(),
            Value::String("CD".to_string())
        );
    }
}
